pub mod config;
pub mod error;
pub mod extract;
pub mod schema;
pub mod source;
pub mod sql;
pub mod tracing;

pub use config::{ExtractConfig, FailurePolicy};
pub use error::{Result, SeedError};
pub use extract::{inspect, run, Inspection, RunReport};
