use crate::adapters::ConfiguredSource;
use crate::config::cli::CliConfig;
use crate::config::Settings;
use crate::core::command::Command;
use crate::core::engine::ElexEngine;
use crate::utils::error::Result;

/// Resolves the command, picks the data source and renders the output.
/// The returned text is exactly what belongs on stdout.
pub async fn run(cli: &CliConfig, settings: &Settings) -> Result<String> {
    let command = Command::resolve(&cli.command)?;
    let query = cli.query();
    // Fail on a bad or missing date before any source is built.
    command.election_date(&query)?;

    let source = ConfiguredSource::select(cli.file_source(), settings.api.clone())?;
    let engine = ElexEngine::new(source);
    engine.run(command, &query, settings.format).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvConfig;
    use crate::utils::error::ElexError;
    use clap::Parser;

    fn cli(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("elex").chain(args.iter().copied())).unwrap()
    }

    async fn run_args(args: &[&str]) -> Result<String> {
        let cli = cli(args);
        let settings = cli.settings(&EnvConfig::default())?;
        run(&cli, &settings).await
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let err = run_args(&["votes", "2015-11-03"]).await.unwrap_err();
        assert!(matches!(err, ElexError::UnknownCommand { .. }));
    }

    #[tokio::test]
    async fn test_missing_date_fails_before_source_selection() {
        // No data file and no API key: the date check must come first.
        let err = run_args(&["races"]).await.unwrap_err();
        assert!(matches!(err, ElexError::MissingArgument { .. }));
    }

    #[tokio::test]
    async fn test_api_source_without_key() {
        let err = run_args(&["elections"]).await.unwrap_err();
        assert!(matches!(err, ElexError::MissingConfigError { .. }));
    }
}
