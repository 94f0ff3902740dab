//! Stage two - imposing prepared pages into a printable booklet
//!
//! This module orchestrates the imposition process:
//! 1. Scale the front and back matter into the target page box
//! 2. Collate front, main and back matter into a padded sequence
//! 3. Cut the sequence into signatures and pair pages for folding
//! 4. Render each pairing as a two-up spread
//! 5. Assemble the spreads into one document

mod blanks;
mod io;

pub use io::list_stream;

use crate::constants::*;
use crate::layout::{collate, impose_signatures};
use crate::options::BookletOptions;
use crate::prepare::normalize::{NormalizeSettings, normalize_stream};
use crate::render::{SpreadCounter, render_spreads, save_document};
use crate::stats::calculate_statistics;
use crate::types::*;
use std::path::PathBuf;

/// What a booklet run produced
#[derive(Debug, Clone, PartialEq)]
pub struct BookletOutput {
    pub statistics: BookletStatistics,
    /// Spread images in document order
    pub spreads: Vec<PathBuf>,
    pub document: PathBuf,
}

/// Main imposition function
pub async fn create_booklet(options: &BookletOptions) -> Result<BookletOutput> {
    options.validate()?;

    let sync_options = options.clone();
    let (statistics, spreads) =
        tokio::task::spawn_blocking(move || render_booklet_sync(&sync_options)).await??;

    let document = options.document_path();
    save_document(&spreads, options.document_dpi, &document).await?;

    Ok(BookletOutput {
        statistics,
        spreads,
        document,
    })
}

/// Count the streams and plan the booklet without writing anything
pub async fn plan_booklet(options: &BookletOptions) -> Result<BookletStatistics> {
    options.validate()?;

    let options = options.clone();
    tokio::task::spawn_blocking(move || {
        let front = list_stream(&options.start_pages_dir)?;
        let main = list_stream(&options.processed_dir)?;
        let back = list_stream(&options.end_pages_dir)?;
        calculate_statistics(
            front.len(),
            main.len(),
            back.len(),
            options.pages_per_booklet,
        )
    })
    .await?
}

fn render_booklet_sync(options: &BookletOptions) -> Result<(BookletStatistics, Vec<PathBuf>)> {
    let main = list_stream(&options.processed_dir)?;
    let front_sources = list_stream(&options.start_pages_dir)?;
    let back_sources = list_stream(&options.end_pages_dir)?;

    if main.is_empty() && front_sources.is_empty() && back_sources.is_empty() {
        return Err(ImposeError::NoPages);
    }

    let size = (options.page_width, options.page_height);
    let settings = NormalizeSettings {
        max_width: options.page_width,
        max_height: options.page_height,
        format: PageFormat::Jpg,
        decode_policy: options.decode_policy,
    };

    log::info!("Scaling start pages...");
    let scaled_start = options.processed_dir.join(SCALED_START_DIR);
    io::reset_dir(&scaled_start)?;
    let front = normalize_stream(&front_sources, &scaled_start, &settings)?;

    log::info!("Scaling end pages...");
    let scaled_end = options.processed_dir.join(SCALED_END_DIR);
    io::reset_dir(&scaled_end)?;
    let back = normalize_stream(&back_sources, &scaled_end, &settings)?;

    let statistics = calculate_statistics(
        front.len(),
        main.len(),
        back.len(),
        options.pages_per_booklet,
    )?;

    let sequence = collate(front, main, back)?;
    log::info!(
        "Total pages in booklet: {} ({} blank)",
        sequence.len(),
        sequence.blank_count()
    );

    let blanks_dir = options.processed_dir.join(BLANKS_DIR);
    io::reset_dir(&blanks_dir)?;
    let pages = blanks::materialize(sequence, &blanks_dir, size, &blanks::run_id())?;

    let signatures = impose_signatures(pages.len(), options.pages_per_booklet)?;

    let booklets_dir = options.booklets_dir();
    io::clear_spreads(&booklets_dir)?;

    let mut counter = SpreadCounter::new();
    let spreads = render_spreads(
        &pages,
        &signatures,
        &booklets_dir,
        size,
        options.decode_policy,
        &mut counter,
    )?;

    if spreads.len() != statistics.spreads {
        return Err(ImposeError::Invariant(format!(
            "rendered {} spreads, planned {}",
            spreads.len(),
            statistics.spreads
        )));
    }

    Ok((statistics, spreads))
}
