//! Cover ingestion workflow
//!
//! Runs the catalog query and turns each considered item into a measured
//! `Record`, skipping items that fail any step.

pub mod pipeline;

pub use pipeline::{IngestReport, IngestionPipeline, RunStats};
