//! Merged double-page detection and splitting
//!
//! Scans are right-to-left: the right half of `<unit>_<n1>-<n2>` is page
//! `n1` and the left half is page `n2`.

use crate::render::codec;
use crate::types::*;
use image::DynamicImage;

/// Split a merged spread at the vertical midline into `(right, left)`.
///
/// `mid = width / 2`, so an odd width leaves the extra pixel column on the
/// right half.
pub fn split_halves(img: &DynamicImage) -> (DynamicImage, DynamicImage) {
    let (width, height) = (img.width(), img.height());
    let mid = width / 2;
    let right = img.crop_imm(mid, 0, width - mid, height);
    let left = img.crop_imm(0, 0, mid, height);
    (right, left)
}

/// Split one double page on disk.
///
/// Writes the right half as page `n1`, the left half as page `n2`, then
/// removes the merged file. Returns `Ok(None)` when the label carries no
/// `n1-n2` pair or the image is too narrow to halve. On a decode failure
/// nothing is written or removed.
pub fn split_page(page: &Page) -> Result<Option<(Page, Page)>> {
    let Some((first, second)) = page.double_page_numbers() else {
        return Ok(None);
    };
    let format = page.format().ok_or_else(|| {
        ImposeError::Config(format!("Unsupported page format: {}", page.path.display()))
    })?;

    let img = codec::decode(&page.path)?;
    if img.width() < 2 {
        log::warn!(
            "Leaving {} unsplit: {} px is too narrow to halve",
            page.file_name(),
            img.width()
        );
        return Ok(None);
    }
    let (right, left) = split_halves(&img);

    let first_page = page.sibling(first.as_str());
    let second_page = page.sibling(second.as_str());

    codec::encode(&right, format, &first_page.path)?;
    if let Err(err) = codec::encode(&left, format, &second_page.path) {
        let _ = std::fs::remove_file(&first_page.path);
        return Err(err);
    }

    std::fs::remove_file(&page.path)?;

    log::info!(
        "Split {} -> {}, {}",
        page.file_name(),
        first_page.file_name(),
        second_page.file_name()
    );

    Ok(Some((first_page, second_page)))
}

/// Replace every merged double page in `pages` by its two halves, keeping
/// the position of the original in the list.
pub fn split_double_pages(pages: Vec<Page>, policy: DecodePolicy) -> Result<Vec<Page>> {
    let mut result = Vec::with_capacity(pages.len());

    for page in pages {
        match split_page(&page) {
            Ok(Some((first, second))) => {
                result.push(first);
                result.push(second);
            }
            Ok(None) => result.push(page),
            Err(err @ ImposeError::Decode { .. }) if policy == DecodePolicy::Skip => {
                log::warn!("Leaving double page unsplit: {err}");
                result.push(page);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(result)
}
