//! Two-up spread composition
//!
//! ```text
//! +-----------+-----------+
//! |     [left]|[right]    |   canvas: 2W x H, white
//! |     [    ]|[     ]    |   both images vertically centred
//! +-----------+-----------+
//!             ^ spine
//! ```
//!
//! Both pages are pushed against the spine. Anything smaller than its half
//! is padded with white, never scaled; anything larger is clipped to its half.

use crate::constants::SPREAD_PREFIX;
use crate::layout::spread_order;
use crate::render::codec;
use crate::types::*;
use image::imageops::overlay;
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};

/// Monotonic spread numbering, threaded through rendering so output names
/// fix the document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpreadCounter(usize);

impl SpreadCounter {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn starting_at(value: usize) -> Self {
        Self(value)
    }

    pub fn current(&self) -> usize {
        self.0
    }

    /// File name for the next spread, advancing the counter
    pub fn next_file_name(&mut self) -> String {
        let name = format!("{SPREAD_PREFIX}{:03}.jpg", self.0);
        self.0 += 1;
        name
    }
}

/// Render `left` and `right` side by side on a `2 * width` x `height` canvas
pub fn compose_spread(
    left: &DynamicImage,
    right: &DynamicImage,
    width: u32,
    height: u32,
) -> RgbImage {
    let left = left.to_rgb8();
    let right = right.to_rgb8();

    // Right-aligned inside the left half
    let mut left_half = codec::blank_page(width, height);
    overlay(
        &mut left_half,
        &left,
        width as i64 - left.width() as i64,
        centre_offset(height, left.height()),
    );

    // Left-aligned inside the right half
    let mut right_half = codec::blank_page(width, height);
    overlay(&mut right_half, &right, 0, centre_offset(height, right.height()));

    let mut canvas = codec::blank_page(width * 2, height);
    overlay(&mut canvas, &left_half, 0, 0);
    overlay(&mut canvas, &right_half, width as i64, 0);
    canvas
}

/// `(canvas - image) // 2`, flooring like integer division on the whole range
fn centre_offset(canvas: u32, image: u32) -> i64 {
    (canvas as i64 - image as i64).div_euclid(2)
}

/// Render every fold pairing of `signatures` into `out_dir`, in document
/// order. `pages` is the materialized collated sequence.
pub fn render_spreads(
    pages: &[PathBuf],
    signatures: &[Signature],
    out_dir: &Path,
    size: (u32, u32),
    policy: DecodePolicy,
    counter: &mut SpreadCounter,
) -> Result<Vec<PathBuf>> {
    let (width, height) = size;
    let mut spreads = Vec::new();

    for pairing in spread_order(signatures) {
        let left = load_member(pages, pairing.left(), size, policy)?;
        let right = load_member(pages, pairing.right(), size, policy)?;

        let canvas = DynamicImage::ImageRgb8(compose_spread(&left, &right, width, height));
        let output = out_dir.join(counter.next_file_name());
        codec::encode(&canvas, PageFormat::Jpg, &output)?;

        log::debug!(
            "Saved booklet page: {} (pages {} | {})",
            output.display(),
            pairing.left(),
            pairing.right()
        );
        spreads.push(output);
    }

    log::info!(
        "Finished processing booklets. Output in {}",
        out_dir.display()
    );

    Ok(spreads)
}

fn load_member(
    pages: &[PathBuf],
    index: usize,
    size: (u32, u32),
    policy: DecodePolicy,
) -> Result<DynamicImage> {
    let path = pages.get(index).ok_or_else(|| {
        ImposeError::Invariant(format!(
            "pairing references page {index} of a {}-page sequence",
            pages.len()
        ))
    })?;

    match codec::decode(path) {
        Ok(img) => Ok(img),
        Err(err @ ImposeError::Decode { .. }) if policy == DecodePolicy::Skip => {
            log::warn!("Printing a blank in place of unreadable page: {err}");
            Ok(DynamicImage::ImageRgb8(codec::blank_page(size.0, size.1)))
        }
        Err(err) => Err(err),
    }
}
