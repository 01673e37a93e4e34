//! Test Helper Utilities
//!
//! Shared utilities for testing coverstat

#![allow(dead_code)]

pub mod fakes;
pub mod image_generator;
pub mod log_capture;

// Re-export commonly used items
pub use fakes::{FailingSink, FakeAssets, FakeCatalog, MemorySink};
pub use image_generator::{cover_url, solid_png, two_tone_png};
pub use log_capture::LogCapture;
