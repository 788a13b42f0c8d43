pub mod calendar;
pub mod command;
pub mod delegates;
pub mod engine;
pub mod render;
pub mod results;

pub use crate::domain::model::{FieldMap, FieldValue, Record};
pub use crate::domain::ports::{DataSource, Resource};
pub use crate::utils::error::Result;
