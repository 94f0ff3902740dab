//! Leading-page order correction
//!
//! Scanners often emit a unit's true first page as `01` next to a separate
//! `00` cover. For every unit not excluded, a page whose last `_` token is
//! `0..01` (`X_01`, `X_page_001`) trades places with the same name ending in
//! `0..00` of the same width when that sibling exists.

use crate::options::DoNotSwapUnits;
use crate::types::*;
use std::fs;
use std::path::{Path, PathBuf};

/// One completed swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRecord {
    pub unit: String,
    pub leading: PathBuf,
    pub zeroth: PathBuf,
}

/// One swap that could not be completed; the unit keeps its original order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapFailure {
    pub unit: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwapReport {
    pub swapped: Vec<SwapRecord>,
    pub failed: Vec<SwapFailure>,
}

/// Swap the leading pages of every unit not listed in `do_not_swap`.
///
/// Each `0+1` page is handled independently, so a unit holding both `01` and
/// `001` performs two swaps. A failed rename is reported, not raised.
pub fn swap_leading_pages(pages: &[Page], do_not_swap: &DoNotSwapUnits) -> SwapReport {
    let mut report = SwapReport::default();

    for page in pages {
        let Some(number) = page.number.as_ref() else {
            continue;
        };
        if !number.is_leading_one() || !page.has_standalone_number() {
            continue;
        }
        if do_not_swap.contains(&page.unit) {
            log::debug!("Keeping natural order for {}", page.unit);
            continue;
        }

        let Some(zeroth) = page.renumbered(&number.zeroed()) else {
            continue;
        };
        if !zeroth.path.exists() {
            continue;
        }

        let temp = swap_temp_path(page);
        match rotate(&page.path, &zeroth.path, &temp) {
            Ok(()) => {
                log::info!("Swapped {} with {}", page.file_name(), zeroth.file_name());
                report.swapped.push(SwapRecord {
                    unit: page.unit.clone(),
                    leading: page.path.clone(),
                    zeroth: zeroth.path.clone(),
                });
            }
            Err(err) => {
                log::warn!("Could not swap {}: {err}", page.file_name());
                report.failed.push(SwapFailure {
                    unit: page.unit.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    report
}

/// Temporary name used while the two files trade places. Its extension keeps
/// it from ever being mistaken for a page.
fn swap_temp_path(page: &Page) -> PathBuf {
    page.dir()
        .join(format!(".{}_{}.swap", page.unit, page.label))
}

/// Exchange the contents of `a` and `b` through `temp`.
///
/// A failure part way rolls back the steps already taken, so both files
/// remain under their original names.
fn rotate(a: &Path, b: &Path, temp: &Path) -> Result<()> {
    rename(a, temp)?;

    if let Err(err) = rename(b, a) {
        let _ = fs::rename(temp, a);
        return Err(err);
    }

    if let Err(err) = rename(temp, b) {
        let _ = fs::rename(a, b);
        let _ = fs::rename(temp, a);
        return Err(err);
    }

    Ok(())
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| ImposeError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_exchanges_contents() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"first").unwrap();
        fs::write(&b, b"second").unwrap();

        rotate(&a, &b, &dir.path().join("t")).unwrap();

        assert_eq!(fs::read(&a).unwrap(), b"second");
        assert_eq!(fs::read(&b).unwrap(), b"first");
        assert!(!dir.path().join("t").exists());
    }

    #[test]
    fn test_rotate_rolls_back_on_missing_partner() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        fs::write(&a, b"first").unwrap();

        let result = rotate(&a, &dir.path().join("missing"), &dir.path().join("t"));

        assert!(matches!(result, Err(ImposeError::Rename { .. })));
        assert_eq!(fs::read(&a).unwrap(), b"first");
        assert!(!dir.path().join("t").exists());
    }
}
