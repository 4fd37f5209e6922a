pub mod aggregate;
pub mod engine;
pub mod filter;
pub mod store;

pub use crate::domain::model::{OutputFormat, QueryReport, Record};
pub use crate::domain::ports::{ConfigProvider, RecordSource, Storage};
pub use crate::utils::error::Result;
