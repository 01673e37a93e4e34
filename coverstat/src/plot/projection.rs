//! Record → plot point projection

use super::PlotMode;
use crate::types::Record;

/// One scatter point with the cover it represents
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionPoint {
    pub x: f64,
    pub y: f64,
    /// Full-resolution cover URL; the renderer derives the thumbnail
    pub thumbnail_url: String,
}

/// Project records onto the two axes of `mode`, preserving order
pub fn project(records: &[Record], mode: PlotMode) -> Vec<ProjectionPoint> {
    records
        .iter()
        .map(|record| {
            let (x, y) = mode.select(record);
            ProjectionPoint {
                x,
                y,
                thumbnail_url: record.url.clone(),
            }
        })
        .collect()
}
