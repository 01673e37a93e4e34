//! Scatter plot renderer with cover thumbnails as markers
//!
//! Every point gets a plain scatter circle. When its thumbnail can be
//! fetched and decoded, the thumbnail is centred on the point as well;
//! otherwise the marker is logged and skipped and rendering carries on.
//!
//! Axis bounds come from the `PlotMode`, never from the data. Points outside
//! the bounds are left off the figure rather than pinned to its edge.

use super::{PlotMode, ProjectionPoint, PLOT_TITLE};
use crate::config::RunConfig;
use crate::services::{cover_metrics, thumbnail_url};
use crate::types::AssetSource;
use plotters::element::BitMapElement;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Fixed figure size in pixels
pub const CANVAS_SIZE: (u32, u32) = (3000, 1800);

const POINT_RADIUS: i32 = 6;

/// Per-marker failure; the marker is skipped
#[derive(Debug, Error)]
pub enum RenderMarkerError {
    #[error("Thumbnail fetch failed: {url}")]
    Fetch { url: String },

    #[error("Thumbnail decode failed for {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Figure could not be drawn or written
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Plotting error: {0}")]
    Backend(String),
}

/// Decoded thumbnail as packed RGB
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// Marker counts for one rendered figure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub points: usize,
    pub markers_placed: usize,
    pub markers_skipped: usize,
    pub out_of_bounds: usize,
}

struct PlacedMarker {
    x: f64,
    y: f64,
    thumbnail: Thumbnail,
}

/// Plot renderer
pub struct PlotRenderer<'a> {
    mode: PlotMode,
    assets: &'a dyn AssetSource,
}

impl<'a> PlotRenderer<'a> {
    pub fn new(config: &RunConfig, assets: &'a dyn AssetSource) -> Self {
        Self {
            mode: config.mode,
            assets,
        }
    }

    pub fn mode(&self) -> PlotMode {
        self.mode
    }

    /// Fetch and decode the thumbnail for one point
    pub async fn load_marker(
        &self,
        point: &ProjectionPoint,
    ) -> Result<Thumbnail, RenderMarkerError> {
        let url = thumbnail_url(&point.thumbnail_url);
        let bytes = self
            .assets
            .fetch(&url)
            .await
            .ok_or_else(|| RenderMarkerError::Fetch { url: url.clone() })?;

        let image = cover_metrics::decode(&bytes).map_err(|e| RenderMarkerError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        let rgb = image.to_rgb8();

        Ok(Thumbnail {
            width: rgb.width(),
            height: rgb.height(),
            rgb: rgb.into_raw(),
        })
    }

    /// Draw the figure for `points` and write it to `output`
    pub async fn render(
        &self,
        points: &[ProjectionPoint],
        output: &Path,
    ) -> Result<RenderSummary, RenderError> {
        info!("Processing data for plotting");
        info!("{} items in array", points.len());

        let mut summary = RenderSummary {
            points: points.len(),
            ..RenderSummary::default()
        };

        let axes = self.mode.axes();
        let (visible, hidden): (Vec<&ProjectionPoint>, Vec<&ProjectionPoint>) =
            points.iter().partition(|p| axes.contains(p.x, p.y));
        for point in &hidden {
            warn!(
                url = %point.thumbnail_url,
                "Point ({}, {}) is outside the plot bounds, leaving it out", point.x, point.y
            );
        }
        summary.out_of_bounds = hidden.len();

        info!("Adding images");
        let mut markers = Vec::with_capacity(visible.len());
        for point in visible.iter().copied() {
            match self.load_marker(point).await {
                Ok(thumbnail) => {
                    markers.push(PlacedMarker {
                        x: point.x,
                        y: point.y,
                        thumbnail,
                    });
                    summary.markers_placed += 1;
                }
                Err(e) => {
                    warn!(url = %point.thumbnail_url, "Something went wrong plotting this image: {}", e);
                    summary.markers_skipped += 1;
                }
            }
        }

        draw_figure(output, self.mode, &visible, markers)
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        info!(path = %output.display(), "Figure written");
        Ok(summary)
    }
}

fn draw_figure(
    output: &Path,
    mode: PlotMode,
    points: &[&ProjectionPoint],
    markers: Vec<PlacedMarker>,
) -> Result<(), Box<dyn std::error::Error>> {
    let axes = mode.axes();

    let root = BitMapBackend::new(output, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            PLOT_TITLE,
            FontDesc::new(FontFamily::SansSerif, 48.0, FontStyle::Normal),
        )
        .margin(40)
        .set_label_area_size(LabelAreaPosition::Left, 110)
        .set_label_area_size(LabelAreaPosition::Bottom, 90)
        .build_cartesian_2d(axes.x_range.clone(), axes.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(axes.x_label)
        .y_desc(axes.y_label)
        .axis_desc_style(FontDesc::new(FontFamily::SansSerif, 32.0, FontStyle::Normal))
        .label_style(FontDesc::new(FontFamily::SansSerif, 24.0, FontStyle::Normal))
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new((p.x, p.y), POINT_RADIUS, RGBColor(31, 119, 180).filled())),
    )?;

    // Bitmap offsets are in pixels relative to the point
    chart.draw_series(markers.into_iter().filter_map(|marker| {
        let size = (marker.thumbnail.width, marker.thumbnail.height);
        let offset = (-(size.0 as i32) / 2, -(size.1 as i32) / 2);
        BitMapElement::with_owned_buffer(offset, size, marker.thumbnail.rgb)
            .map(|bitmap| EmptyElement::at((marker.x, marker.y)) + bitmap)
    }))?;

    root.present()?;
    Ok(())
}
