//! Page stream listing and output directory housekeeping

use crate::constants::SPREAD_PREFIX;
use crate::types::*;
use std::path::{Path, PathBuf};

/// List the page images directly inside `dir`, sorted by file name.
///
/// Subdirectories and non-image files are ignored; callers rely on
/// zero-padded names for lexicographic order to match reading order.
pub fn list_stream(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && PageFormat::from_path(&path).is_some() {
            pages.push(path);
        }
    }
    pages.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pages)
}

/// Recreate a directory this tool owns outright, dropping its old contents
pub(crate) fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Remove spreads left over from an earlier run, keeping anything else
pub(crate) fn clear_spreads(dir: &Path) -> Result<usize> {
    std::fs::create_dir_all(dir)?;

    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_spread = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(SPREAD_PREFIX) && name.ends_with(".jpg"));
        if is_spread && path.is_file() {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }

    if removed > 0 {
        log::debug!("Removed {removed} stale spreads from {}", dir.display());
    }
    Ok(removed)
}
