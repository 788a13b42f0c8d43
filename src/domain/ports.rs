use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Upstream documents the commands are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Results feed for one election day.
    Election { date: String },
    /// Calendar of known elections.
    Calendar,
    DelegateSum,
    DelegateSuper,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Election { date } => write!(f, "election feed for {date}"),
            Resource::Calendar => f.write_str("election calendar"),
            Resource::DelegateSum => f.write_str("delegate summary report"),
            Resource::DelegateSuper => f.write_str("delegate super report"),
        }
    }
}

/// Where raw payloads come from. Implementations fail with a data access
/// error before returning anything when the document cannot be produced.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load(&self, resource: &Resource) -> Result<serde_json::Value>;
}
