pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{FileRecordSource, LocalStorage};
pub use core::aggregate::mean;
pub use core::engine::{describe_plan, QueryEngine, QueryRequest};
pub use core::filter::{both, either, negate, RecordFilter};
pub use core::store::RecordStore;
pub use domain::model::{OutputFormat, QueryReport, Record, ADULT_AGE};
pub use utils::error::{QueryError, Result};
