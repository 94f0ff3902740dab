//! Stage one - turning a folder of comic archives into page images
//!
//! This module orchestrates the preparation process:
//! 1. Extract every archive into `<input>/extracted`
//! 2. Split merged double pages
//! 3. Swap misordered leading pages
//! 4. Scale every page into the target box and convert its format

pub mod extract;
pub mod normalize;
pub mod split;
pub mod swap;

use crate::options::PrepareOptions;
use crate::types::*;
use extract::{extract_archive, list_archives, unit_name};
use normalize::{NormalizeSettings, normalize_pages};
use split::split_double_pages;
use std::collections::BTreeSet;
use swap::{SwapReport, swap_leading_pages};

/// Outcome of the preparation stage
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareReport {
    /// Every unit found in the input directory
    pub units: BTreeSet<String>,
    /// Final pages, grouped by unit in archive order
    pub pages: Vec<Page>,
    pub swaps: SwapReport,
    /// Archives that could not be read and were skipped
    pub skipped_archives: Vec<String>,
    /// `<archive>: <entry>` for entries skipped inside readable archives
    pub skipped_entries: Vec<String>,
}

/// Main preparation function
pub async fn prepare(options: &PrepareOptions) -> Result<PrepareReport> {
    options.validate()?;

    let options = options.clone();

    tokio::task::spawn_blocking(move || prepare_sync(&options)).await?
}

fn prepare_sync(options: &PrepareOptions) -> Result<PrepareReport> {
    let output_dir = options.extracted_dir();
    std::fs::create_dir_all(&output_dir)?;

    let archives = list_archives(&options.input_dir)?;
    let units: BTreeSet<String> = archives.iter().filter_map(|a| unit_name(a)).collect();

    let mut pages = Vec::new();
    let mut skipped_archives = Vec::new();
    let mut skipped_entries = Vec::new();
    for archive in &archives {
        match extract_archive(archive, &output_dir, options.decode_policy) {
            Ok(unit) => {
                skipped_entries.extend(
                    unit.skipped_entries
                        .iter()
                        .map(|entry| format!("{}: {entry}", archive.display())),
                );
                pages.extend(unit.pages);
            }
            Err(err @ ImposeError::Archive(_)) if options.decode_policy == DecodePolicy::Skip => {
                log::warn!("Skipping unreadable archive {}: {err}", archive.display());
                skipped_archives.push(archive.display().to_string());
            }
            Err(err) => return Err(err),
        }
    }

    let pages = split_double_pages(pages, options.decode_policy)?;

    let do_not_swap = options.no_swap.resolve(&units);
    let swaps = swap_leading_pages(&pages, &do_not_swap);

    let settings = NormalizeSettings {
        max_width: options.page_width,
        max_height: options.page_height,
        format: options.convert_format,
        decode_policy: options.decode_policy,
    };
    let pages = normalize_pages(pages, &settings)?;

    log::info!(
        "Prepared {} pages from {} archives in {}",
        pages.len(),
        archives.len(),
        output_dir.display()
    );

    Ok(PrepareReport {
        units,
        pages,
        swaps,
        skipped_archives,
        skipped_entries,
    })
}
