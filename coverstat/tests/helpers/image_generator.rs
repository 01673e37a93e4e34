//! In-memory cover image generation
//!
//! PNG keeps pixel values exact, so expected metrics can be computed by hand.

use coverstat::services::build_asset_url;
use coverstat::types::SizeTag;
use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma, Rgb, RgbImage};
use std::io::Cursor;

fn encode(image: DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .expect("PNG encoding failed");
    buf.into_inner()
}

/// Uniform RGB cover
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        Rgb(rgb),
    )))
}

/// Left half black, right half white
pub fn two_tone_png(width: u32, height: u32) -> Vec<u8> {
    let image: RgbImage = ImageBuffer::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    encode(DynamicImage::ImageRgb8(image))
}

/// Single-channel cover
pub fn gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    encode(DynamicImage::ImageLuma8(GrayImage::from_pixel(
        width,
        height,
        Luma([value]),
    )))
}

/// Full-resolution cover URL for an identifier
pub fn cover_url(identifier: &str) -> String {
    build_asset_url(identifier, SizeTag::Full)
}
