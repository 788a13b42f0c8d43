use crate::core::command::{Command, Query};
use crate::core::render::{render, OutputFormat};
use crate::domain::ports::DataSource;
use crate::utils::error::Result;

/// Runs one command end to end: fetch, then render. Nothing is written
/// here; the caller decides where the text goes.
pub struct ElexEngine<S: DataSource> {
    source: S,
}

impl<S: DataSource> ElexEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn run(&self, command: Command, query: &Query, format: OutputFormat) -> Result<String> {
        tracing::info!("Running `{}` as {}", command, format);

        let records = command.fetch(&self.source, query).await?;
        tracing::debug!("Fetched {} {:?} records", records.len(), command.record_kind());

        let output = render(&records, format)?;
        tracing::debug!("Rendered {} bytes", output.len());

        Ok(output)
    }
}
