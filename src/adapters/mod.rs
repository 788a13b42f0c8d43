// Adapters layer: concrete data sources (local files, HTTP API).

pub mod file;
pub mod http;

pub use file::FileSource;
pub use http::{ApiSettings, ApiSource, DEFAULT_BASE_URL};

use crate::domain::ports::{DataSource, Resource};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The source chosen at startup: local files when any data file was given,
/// the API otherwise.
pub enum ConfiguredSource {
    Files(FileSource),
    Api(ApiSource),
}

impl ConfiguredSource {
    pub fn select(files: FileSource, api: ApiSettings) -> Result<Self> {
        if files.is_empty() {
            tracing::debug!("Using API source at {}", api.base_url);
            Ok(ConfiguredSource::Api(ApiSource::new(api)?))
        } else {
            tracing::debug!("Using local data files");
            Ok(ConfiguredSource::Files(files))
        }
    }
}

#[async_trait]
impl DataSource for ConfiguredSource {
    async fn load(&self, resource: &Resource) -> Result<serde_json::Value> {
        match self {
            ConfiguredSource::Files(source) => source.load(resource).await,
            ConfiguredSource::Api(source) => source.load(resource).await,
        }
    }
}
