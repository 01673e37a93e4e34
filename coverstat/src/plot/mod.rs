//! Plotting: axis projection and figure rendering
//!
//! `PlotMode` is the closed set of supported projections. Each variant
//! carries its own axis labels, fixed display bounds and field selector, so
//! adding a mode means adding a variant and nothing else.

pub mod projection;
pub mod renderer;

pub use projection::{project, ProjectionPoint};
pub use renderer::{PlotRenderer, RenderError, RenderMarkerError};

use crate::types::Record;
use std::ops::Range;

/// Figure title
pub const PLOT_TITLE: &str = "Visual Trends of Pressbooks";

/// Which two record fields are plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    /// x = brightness, y = contrast (mode 1)
    #[default]
    BrightnessContrast,
    /// x = year, y = brightness (mode 2)
    YearBrightness,
}

/// Axis labels and fixed bounds for one mode
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl AxisSpec {
    /// Whether (x, y) falls inside the display bounds (edges included)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_range.start
            && x <= self.x_range.end
            && y >= self.y_range.start
            && y <= self.y_range.end
    }
}

impl PlotMode {
    /// Map the operator-facing mode number
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(PlotMode::BrightnessContrast),
            2 => Some(PlotMode::YearBrightness),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            PlotMode::BrightnessContrast => 1,
            PlotMode::YearBrightness => 2,
        }
    }

    /// Labels and bounds; bounds are fixed so figures compare across runs
    pub fn axes(&self) -> AxisSpec {
        match self {
            PlotMode::BrightnessContrast => AxisSpec {
                x_label: "Brightness",
                y_label: "Contrast",
                x_range: 0.0..255.0,
                y_range: -50.0..200.0,
            },
            PlotMode::YearBrightness => AxisSpec {
                x_label: "Year",
                y_label: "Brightness",
                x_range: 1900.0..2000.0,
                y_range: 0.0..300.0,
            },
        }
    }

    /// Select the (x, y) pair for a record
    pub fn select(&self, record: &Record) -> (f64, f64) {
        match self {
            PlotMode::BrightnessContrast => (record.brightness, record.contrast),
            PlotMode::YearBrightness => (record.year as f64, record.brightness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_numbers() {
        assert_eq!(PlotMode::from_number(1), Some(PlotMode::BrightnessContrast));
        assert_eq!(PlotMode::from_number(2), Some(PlotMode::YearBrightness));
        assert_eq!(PlotMode::from_number(3), None);
        assert_eq!(PlotMode::default().number(), 1);
    }

    #[test]
    fn test_axis_bounds() {
        let first = PlotMode::BrightnessContrast.axes();
        assert_eq!(first.x_label, "Brightness");
        assert_eq!(first.y_label, "Contrast");
        assert_eq!(first.x_range, 0.0..255.0);
        assert_eq!(first.y_range, -50.0..200.0);

        let second = PlotMode::YearBrightness.axes();
        assert_eq!(second.x_label, "Year");
        assert_eq!(second.x_range, 1900.0..2000.0);
        assert_eq!(second.y_range, 0.0..300.0);
    }

    #[test]
    fn test_axis_contains_includes_edges() {
        let axes = PlotMode::YearBrightness.axes();
        assert!(axes.contains(1900.0, 0.0));
        assert!(axes.contains(2000.0, 300.0));
        assert!(axes.contains(1942.0, 128.0));
        assert!(!axes.contains(1890.0, 150.0));
        assert!(!axes.contains(2001.0, 150.0));
        assert!(!axes.contains(1942.0, 300.5));
    }
}
