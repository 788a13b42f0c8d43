use crate::adapters::FileSource;
use crate::config::toml_config::TomlConfig;
use crate::config::{EnvConfig, Settings};
use crate::core::command::Query;
use crate::core::render::OutputFormat;
use crate::core::results::{ResultOptions, ResultsLevel};
use crate::utils::error::Result;
use crate::utils::logger::Verbosity;
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "elex", version)]
#[command(about = "Fetch election results and print them as CSV or JSON")]
pub struct CliConfig {
    /// races, candidates, reporting-units, candidate-reporting-units, results,
    /// ballot-measures, elections, next-election or delegates
    pub command: String,

    /// Election date (YYYY-MM-DD); the reference date for next-election
    pub election_date: Option<String>,

    /// Read the election feed or calendar from this file instead of the API
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Read the delegate summary report from this file
    #[arg(long, value_name = "PATH")]
    pub delegate_sum_file: Option<PathBuf>,

    /// Read the delegate super report from this file
    #[arg(long, value_name = "PATH")]
    pub delegate_super_file: Option<PathBuf>,

    /// Output format [default: csv]
    #[arg(short = 'o', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Only include these race ids (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub raceids: Vec<String>,

    /// Only include national races
    #[arg(long, conflicts_with = "local_only")]
    pub national_only: bool,

    /// Only include local races
    #[arg(long)]
    pub local_only: bool,

    /// Reporting unit level to include [default: ru]
    #[arg(long, value_enum)]
    pub results_level: Option<ResultsLevel>,

    /// Zero every vote count and clear winners
    #[arg(long)]
    pub set_zero_counts: bool,

    /// Request test data from the API
    #[arg(long)]
    pub test: bool,

    /// API key (overrides AP_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// API base URL (overrides AP_API_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CliConfig {
    pub fn query(&self) -> Query {
        let national = match (self.national_only, self.local_only) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        Query {
            election_date: self.election_date.clone(),
            options: ResultOptions {
                race_ids: self.raceids.clone(),
                national,
                level: self.results_level.unwrap_or_default(),
                set_zero_counts: self.set_zero_counts,
            },
        }
    }

    pub fn file_source(&self) -> FileSource {
        FileSource::default()
            .with_data_file(self.data_file.clone())
            .with_delegate_files(
                self.delegate_sum_file.clone(),
                self.delegate_super_file.clone(),
            )
    }

    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    /// Defaults < config file < environment < flags.
    pub fn settings(&self, env: &EnvConfig) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let mut settings = Settings::layered(&file, env)?;
        if let Some(base_url) = &self.base_url {
            validate_url("--base-url", base_url)?;
            settings.api.base_url = base_url.clone();
        }
        if self.api_key.is_some() {
            settings.api.api_key = self.api_key.clone();
        }
        if self.test {
            settings.api.test = true;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        Ok(settings)
    }
}
