pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{ApiSettings, ApiSource, ConfiguredSource, FileSource};
pub use crate::core::{
    command::{Command, Query},
    engine::ElexEngine,
    render::OutputFormat,
};
pub use domain::model::Record;
pub use utils::error::{ElexError, Result};
