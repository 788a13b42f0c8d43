//! CSV and JSON output. Both work on anything implementing [`Record`].

use crate::domain::model::{cell_text, Record};
use crate::utils::error::{ElexError, Result};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

pub fn render<R: Record>(records: &[R], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Json => render_json(records),
    }
}

/// Header comes from the first record's field order; every row follows it.
/// An empty sequence has no header and is an error.
pub fn render_csv<R: Record>(records: &[R]) -> Result<String> {
    let first = records.first().ok_or_else(|| ElexError::Render {
        format: OutputFormat::Csv.to_string(),
        message: "no records to derive a header from".to_string(),
    })?;
    let header: Vec<String> = first.serialize().keys().cloned().collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&header)?;

    for record in records {
        let fields = record.serialize();
        writer.write_record(
            header
                .iter()
                .map(|name| fields.get(name).map(cell_text).unwrap_or_default()),
        )?;
    }

    let bytes = writer.into_inner().map_err(|e| ElexError::Render {
        format: OutputFormat::Csv.to_string(),
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| ElexError::Render {
        format: OutputFormat::Csv.to_string(),
        message: e.to_string(),
    })
}

/// Compact JSON array of objects in field order; `[]` when empty.
pub fn render_json<R: Record>(records: &[R]) -> Result<String> {
    let rows: Vec<Value> = records
        .iter()
        .map(|record| Value::Object(record.serialize()))
        .collect();
    Ok(serde_json::to_string(&rows)?)
}
