#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::ApiSettings;
use crate::core::render::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use std::env;
use toml_config::TomlConfig;

pub const API_KEY_VAR: &str = "AP_API_KEY";
pub const BASE_URL_VAR: &str = "AP_API_BASE_URL";

/// Values taken from the process environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_VAR).ok().filter(|v| !v.is_empty()),
            base_url: env::var(BASE_URL_VAR).ok().filter(|v| !v.is_empty()),
        }
    }
}

/// Effective settings after layering defaults, the config file and the
/// environment. Command-line flags are applied on top by the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub api: ApiSettings,
    pub format: OutputFormat,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Settings {
    pub fn layered(file: &TomlConfig, env: &EnvConfig) -> Result<Self> {
        let mut api = ApiSettings::default();
        if let Some(base_url) = &file.api.base_url {
            api.base_url = base_url.clone();
        }
        api.api_key = file.api.api_key.clone();
        if let Some(test) = file.api.test {
            api.test = test;
        }
        if let Some(timeout) = file.api.timeout_seconds {
            api.timeout_seconds = timeout;
        }

        if let Some(base_url) = &env.base_url {
            validate_url(BASE_URL_VAR, base_url)?;
            api.base_url = base_url.clone();
        }
        if env.api_key.is_some() {
            api.api_key = env.api_key.clone();
        }

        Ok(Self {
            api,
            format: file.output_format().unwrap_or_default(),
            log_level: file.logging.level.clone(),
            log_json: file.logging.format.as_deref() == Some("json"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::DEFAULT_BASE_URL;

    #[test]
    fn test_defaults() {
        let settings = Settings::layered(&TomlConfig::default(), &EnvConfig::default()).unwrap();

        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.api.api_key, None);
        assert_eq!(settings.format, OutputFormat::Csv);
        assert!(!settings.log_json);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "https://file.example.com"
api_key = "file-key"
test = true

[output]
format = "json"
"#,
        )
        .unwrap();
        let env = EnvConfig {
            api_key: Some("env-key".to_string()),
            base_url: None,
        };

        let settings = Settings::layered(&file, &env).unwrap();

        assert_eq!(settings.api.base_url, "https://file.example.com");
        assert_eq!(settings.api.api_key.as_deref(), Some("env-key"));
        assert!(settings.api.test);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_environment_url() {
        let env = EnvConfig {
            api_key: None,
            base_url: Some("not a url".to_string()),
        };

        assert!(Settings::layered(&TomlConfig::default(), &env).is_err());
    }
}
