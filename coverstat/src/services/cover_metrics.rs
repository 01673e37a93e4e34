//! Cover brightness and contrast metrics
//!
//! Both metrics are derived from per-channel statistics over the decoded
//! image's native channel layout (8-bit samples):
//! - **Brightness:** perceived brightness of the mean colour,
//!   `sqrt(0.241 r² + 0.691 g² + 0.068 b²)` (HSP colour model weights)
//! - **Contrast:** mean of the per-channel population standard deviations
//!
//! A grayscale cover yields a one-channel contrast but has no brightness.

use crate::types::VisualMetrics;
use image::DynamicImage;
use thiserror::Error;

const RED_WEIGHT: f64 = 0.241;
const GREEN_WEIGHT: f64 = 0.691;
const BLUE_WEIGHT: f64 = 0.068;

/// Metric computation errors (all are "asset is not a usable image")
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Bytes could not be decoded as an image
    #[error("Image decode error: {0}")]
    Decode(String),

    /// Image has no pixels
    #[error("Image has no pixels")]
    Empty,

    /// Brightness needs at least three colour channels
    #[error("Expected at least 3 channels, image has {0}")]
    UnsupportedChannels(usize),
}

/// Per-channel mean and standard deviation
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStats {
    pub means: Vec<f64>,
    pub stddevs: Vec<f64>,
}

impl ChannelStats {
    /// Compute statistics over interleaved samples
    ///
    /// `samples.len()` must be a multiple of `channels`.
    pub fn from_samples(samples: &[u8], channels: usize) -> Result<Self, MetricsError> {
        if channels == 0 || samples.is_empty() {
            return Err(MetricsError::Empty);
        }
        let pixel_count = samples.len() / channels;
        if pixel_count == 0 {
            return Err(MetricsError::Empty);
        }
        let n = pixel_count as f64;

        let mut sums = vec![0.0f64; channels];
        for pixel in samples.chunks_exact(channels) {
            for (sum, &value) in sums.iter_mut().zip(pixel) {
                *sum += value as f64;
            }
        }
        let means: Vec<f64> = sums.iter().map(|s| s / n).collect();

        // Second pass keeps a constant channel at exactly zero
        let mut squared = vec![0.0f64; channels];
        for pixel in samples.chunks_exact(channels) {
            for ((acc, &value), mean) in squared.iter_mut().zip(pixel).zip(&means) {
                let d = value as f64 - mean;
                *acc += d * d;
            }
        }
        let stddevs = squared.iter().map(|s| (s / n).sqrt()).collect();

        Ok(Self { means, stddevs })
    }

    /// Compute statistics for a decoded image in its native channel layout
    pub fn from_image(image: &DynamicImage) -> Result<Self, MetricsError> {
        let channels = image.color().channel_count() as usize;
        let samples = match channels {
            1 => image.to_luma8().into_raw(),
            2 => image.to_luma_alpha8().into_raw(),
            3 => image.to_rgb8().into_raw(),
            _ => image.to_rgba8().into_raw(),
        };
        Self::from_samples(&samples, channels.clamp(1, 4))
    }

    pub fn channel_count(&self) -> usize {
        self.means.len()
    }
}

/// Decode cover bytes (format sniffed from content)
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, MetricsError> {
    image::load_from_memory(bytes).map_err(|e| MetricsError::Decode(e.to_string()))
}

/// Perceived brightness of an (r, g, b) mean colour
pub fn perceived_brightness(r: f64, g: f64, b: f64) -> f64 {
    (RED_WEIGHT * r * r + GREEN_WEIGHT * g * g + BLUE_WEIGHT * b * b).sqrt()
}

/// Brightness from the first three channel means
pub fn compute_brightness(stats: &ChannelStats) -> Result<f64, MetricsError> {
    match stats.means.as_slice() {
        [r, g, b, ..] => Ok(perceived_brightness(*r, *g, *b)),
        _ => Err(MetricsError::UnsupportedChannels(stats.channel_count())),
    }
}

/// Mean of the per-channel standard deviations
pub fn compute_contrast(stats: &ChannelStats) -> f64 {
    if stats.stddevs.is_empty() {
        return 0.0;
    }
    stats.stddevs.iter().sum::<f64>() / stats.stddevs.len() as f64
}

/// Decode once and compute both metrics
pub fn measure(bytes: &[u8]) -> Result<VisualMetrics, MetricsError> {
    let image = decode(bytes)?;
    let stats = ChannelStats::from_image(&image)?;
    Ok(VisualMetrics {
        brightness: compute_brightness(&stats)?,
        contrast: compute_contrast(&stats),
    })
}
