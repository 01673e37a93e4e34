//! Error types for coverstat
//!
//! Per-item errors (`ItemError`) never leave the pipeline: they are logged
//! and the item is skipped. `PipelineError` covers the two conditions that
//! end a run early: the catalog cannot be queried at all, or the durable
//! sink cannot be written.

use crate::services::{CatalogError, ExtractError, MetricsError, SinkError};
use thiserror::Error;

/// Why a single catalog item produced no record
#[derive(Debug, Error)]
pub enum ItemError {
    /// Item metadata could not be retrieved
    #[error("Metadata lookup failed: {0}")]
    Metadata(#[source] CatalogError),

    /// Cover bytes could not be fetched
    #[error("Fetch failed: {url}")]
    FetchFailure { url: String },

    /// Cover bytes are not a usable image
    #[error(transparent)]
    Decode(#[from] MetricsError),

    /// Required metadata missing or malformed
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Failure categories, for run statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemErrorKind {
    Metadata,
    FetchFailure,
    Decode,
    MissingField,
    DateParse,
}

impl ItemError {
    pub fn kind(&self) -> ItemErrorKind {
        match self {
            ItemError::Metadata(_) => ItemErrorKind::Metadata,
            ItemError::FetchFailure { .. } => ItemErrorKind::FetchFailure,
            ItemError::Decode(_) => ItemErrorKind::Decode,
            ItemError::Extract(ExtractError::MissingField(_)) => ItemErrorKind::MissingField,
            ItemError::Extract(ExtractError::DateParse { .. }) => ItemErrorKind::DateParse,
        }
    }
}

/// Run-ending pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The catalog query could not be issued
    #[error("Catalog query failed: {0}")]
    Catalog(#[from] CatalogError),

    /// A completed record could not be persisted
    #[error("Record sink failed: {0}")]
    Sink(#[from] SinkError),
}
