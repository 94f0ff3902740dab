//! Blank page synthesis for the collated sequence

use crate::layout::{CollatedSequence, SequenceEntry};
use crate::render::codec;
use crate::types::*;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Identifier stamped into every blank written during one run
pub(crate) fn run_id() -> String {
    chrono::Local::now().format("%Y%m%d%H%M%S%3f").to_string()
}

/// Turn a collated sequence into concrete files, writing one white page of
/// `width` x `height` per blank entry into `blanks_dir`.
///
/// The blank is encoded once and copied for every further slot.
pub(crate) fn materialize(
    sequence: CollatedSequence<PathBuf>,
    blanks_dir: &Path,
    (width, height): (u32, u32),
    run_id: &str,
) -> Result<Vec<PathBuf>> {
    let mut template: Option<PathBuf> = None;
    let mut blank_seq = 0;
    let mut pages = Vec::with_capacity(sequence.len());

    for entry in sequence.into_entries() {
        match entry {
            SequenceEntry::Page(path) => pages.push(path),
            SequenceEntry::Blank(kind) => {
                let path = blanks_dir.join(format!("blank_{run_id}_{blank_seq:03}.jpg"));
                blank_seq += 1;

                match &template {
                    Some(first) => {
                        std::fs::copy(first, &path)?;
                    }
                    None => {
                        let blank = DynamicImage::ImageRgb8(codec::blank_page(width, height));
                        codec::encode(&blank, PageFormat::Jpg, &path)?;
                        template = Some(path.clone());
                    }
                }

                log::debug!("Inserted blank page ({kind:?}) at position {}", pages.len());
                pages.push(path);
            }
        }
    }

    Ok(pages)
}
