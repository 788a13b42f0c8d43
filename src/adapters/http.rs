use crate::domain::ports::{DataSource, Resource};
use crate::utils::error::{ElexError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.ap.org/v2";

/// Connection settings for the upstream elections API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Ask the API for test data instead of live results.
    pub test: bool,
    pub timeout_seconds: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            test: false,
            timeout_seconds: 30,
        }
    }
}

pub struct ApiSource {
    settings: ApiSettings,
    client: Client,
}

impl ApiSource {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        Ok(Self { settings, client })
    }

    /// Absolute URL for a resource, without query parameters.
    pub fn endpoint(&self, resource: &Resource) -> Result<Url> {
        let path = match resource {
            Resource::Election { date } => format!("elections/{date}"),
            Resource::Calendar => "elections".to_string(),
            Resource::DelegateSum => "reports/delsum".to_string(),
            Resource::DelegateSuper => "reports/delsuper".to_string(),
        };

        // A trailing slash keeps the base path when joining.
        let base = format!("{}/", self.settings.base_url.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|base| base.join(&path))
            .map_err(|e| ElexError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: self.settings.base_url.clone(),
                reason: e.to_string(),
            })
    }

    fn query_params(&self, resource: &Resource, api_key: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("apiKey", api_key.to_string()),
        ];
        if let Resource::Election { .. } = resource {
            params.push(("level", "ru".to_string()));
            params.push(("test", self.settings.test.to_string()));
        }
        params
    }
}

#[async_trait]
impl DataSource for ApiSource {
    async fn load(&self, resource: &Resource) -> Result<serde_json::Value> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ElexError::MissingConfigError {
                field: "api.api_key (or AP_API_KEY)".to_string(),
            })?;

        let url = self.endpoint(resource)?;
        tracing::debug!("Making API request for {} to: {}", resource, url);

        let response = self
            .client
            .get(url.clone())
            .query(&self.query_params(resource, api_key))
            .send()
            .await
            .map_err(|e| ElexError::data_access(url.as_str(), e.without_url()))?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(ElexError::data_access(
                url.as_str(),
                format!("upstream returned {}", response.status()),
            ));
        }

        response.json().await.map_err(|e| {
            ElexError::data_access(url.as_str(), format!("not valid JSON: {}", e.without_url()))
        })
    }
}
