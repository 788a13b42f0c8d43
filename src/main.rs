use clap::Parser;
use elex::config::EnvConfig;
use elex::utils::logger;
use elex::{CliConfig, ElexError};
use std::io::Write;
use std::process::ExitCode;

fn report(e: &ElexError) -> ExitCode {
    tracing::error!(
        "{} (category: {:?}, exit code: {})",
        e,
        e.category(),
        e.exit_code()
    );
    eprintln!("error: {}", e);
    eprintln!("hint: {}", e.recovery_suggestion());
    ExitCode::from(e.exit_code() as u8)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();

    let settings = match cli.settings(&EnvConfig::from_env()) {
        Ok(settings) => settings,
        Err(e) => return report(&e),
    };

    if settings.log_json {
        logger::init_json_logger(cli.verbosity(), settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbosity(), settings.log_level.as_deref());
    }
    tracing::debug!("Command: {} {:?}", cli.command, cli.election_date);

    let output = match elex::app::run(&cli, &settings).await {
        Ok(output) => output,
        Err(e) => return report(&e),
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
        return report(&ElexError::from(e));
    }

    ExitCode::SUCCESS
}
