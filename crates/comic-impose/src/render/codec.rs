//! Decode and encode helpers over the `image` crate

use crate::constants::JPEG_QUALITY;
use crate::types::*;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Decode an image, tagging failures with the offending path
pub fn decode(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| ImposeError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode `img` to `path` in the given format.
///
/// JPEG is written at a fixed high quality and without alpha. WebP output is
/// lossless; the `image` crate ships no lossy WebP encoder.
pub fn encode(img: &DynamicImage, format: PageFormat, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    match format {
        PageFormat::Jpg => {
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY))?;
        }
        PageFormat::Png => {
            img.write_with_encoder(PngEncoder::new(&mut writer))?;
        }
        PageFormat::Webp => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_with_encoder(WebPEncoder::new_lossless(&mut writer))?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// A plain white page of exactly `width` x `height`
pub fn blank_page(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]))
}
