//! Batch ingestion of a flat sensor-log CSV into postgres: parse the source
//! rows, derive the 6-digit model code from each identifier, and replace the
//! `temperatures` table that the aggregation views are built over.

pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod parse;
pub mod views;

pub use config::DbConfig;
pub use error::IngestError;
