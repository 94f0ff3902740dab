//! Fit-to-box scaling and format conversion

use crate::render::codec;
use crate::types::*;
use image::imageops::FilterType;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Target box and encoding shared by every normalized image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeSettings {
    pub max_width: u32,
    pub max_height: u32,
    pub format: PageFormat,
    pub decode_policy: DecodePolicy,
}

/// Largest aspect-preserving size that fits `max_width` x `max_height`.
///
/// Fitting by width wins whenever the resulting height stays in bounds;
/// otherwise the image is fitted by height. Dimensions are truncated, never
/// rounded up, and never drop below one pixel.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let aspect = width as f64 / height.max(1) as f64;

    let width_scaled_height = (max_width as f64 / aspect) as u32;
    if width_scaled_height <= max_height {
        (max_width, width_scaled_height.max(1))
    } else {
        let height_scaled_width = (max_height as f64 * aspect) as u32;
        (height_scaled_width.max(1), max_height)
    }
}

/// Scale `src` into the target box and write it to `dest` in the target
/// format. Returns the written dimensions.
pub fn normalize_image(src: &Path, dest: &Path, settings: &NormalizeSettings) -> Result<(u32, u32)> {
    let img = codec::decode(src)?;
    let (width, height) = fit_within(
        img.width(),
        img.height(),
        settings.max_width,
        settings.max_height,
    );
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);
    codec::encode(&resized, settings.format, dest)?;
    Ok((width, height))
}

/// Normalize a unit page in place. When the format changes, the page gets a
/// new extension and the original file is removed.
pub fn normalize_page(page: &Page, settings: &NormalizeSettings) -> Result<Page> {
    let target = Page::new(
        page.dir(),
        &page.unit,
        &page.label,
        settings.format.extension(),
    );
    let (width, height) = normalize_image(&page.path, &target.path, settings)?;

    if target.path != page.path {
        std::fs::remove_file(&page.path)?;
    }

    log::info!(
        "Resized {} -> ({}, {}), saved as {}",
        page.file_name(),
        width,
        height,
        settings.format.extension().to_uppercase()
    );

    Ok(target)
}

/// Normalize every page, applying the decode policy per page
pub fn normalize_pages(pages: Vec<Page>, settings: &NormalizeSettings) -> Result<Vec<Page>> {
    let mut result = Vec::with_capacity(pages.len());

    for page in pages {
        match normalize_page(&page, settings) {
            Ok(normalized) => result.push(normalized),
            Err(err @ ImposeError::Decode { .. })
                if settings.decode_policy == DecodePolicy::Skip =>
            {
                log::warn!("Leaving page unscaled: {err}");
                result.push(page);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(result)
}

/// Normalize free-standing stream files (front or back matter) into
/// `dest_dir`, keeping their stems so lexicographic order is preserved.
/// Sources are never modified. Of several files sharing a stem (`a.png`,
/// `a.webp`) only the first is kept.
pub fn normalize_stream(
    files: &[PathBuf],
    dest_dir: &Path,
    settings: &NormalizeSettings,
) -> Result<Vec<PathBuf>> {
    let mut result = Vec::with_capacity(files.len());
    let mut claimed = HashSet::new();

    for src in files {
        let stem = src
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                ImposeError::Config(format!("Unusable file name: {}", src.display()))
            })?;
        let dest = dest_dir.join(format!("{stem}.{}", settings.format.extension()));
        if claimed.contains(&dest) {
            log::warn!(
                "Dropping {}: another page already scales to {}",
                src.display(),
                dest.display()
            );
            continue;
        }

        match normalize_image(src, &dest, settings) {
            Ok((width, height)) => {
                log::debug!("Scaled and saved: {} ({width}x{height})", dest.display());
                claimed.insert(dest.clone());
                result.push(dest);
            }
            Err(err @ ImposeError::Decode { .. })
                if settings.decode_policy == DecodePolicy::Skip =>
            {
                log::warn!("Dropping unreadable page from stream: {err}");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(result)
}
