//! coverstat library interface
//!
//! Builds a small research dataset from archive pressbook covers: catalog
//! query, cover fetch, brightness/contrast measurement, CSV output and an
//! optional thumbnail scatter plot.

pub mod config;
pub mod error;
pub mod plot;
pub mod services;
pub mod types;
pub mod workflow;

pub use crate::config::{Args, RunConfig};
pub use crate::error::{ItemError, PipelineError};
pub use crate::types::{AssetSource, Catalog, CatalogItem, Record, RecordSink, VisualMetrics};
