use crate::constants::PAGES_PER_SHEET;
use crate::layout::{collate, impose_signatures};
use crate::types::*;

/// Calculate statistics for a booklet built from streams of the given sizes.
///
/// Runs the same collation and signature plan the renderer uses, on
/// placeholder pages.
pub fn calculate_statistics(
    front_pages: usize,
    main_pages: usize,
    back_pages: usize,
    pages_per_booklet: usize,
) -> Result<BookletStatistics> {
    if front_pages + main_pages + back_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    let sequence = collate(
        vec![(); front_pages],
        vec![(); main_pages],
        vec![(); back_pages],
    )?;
    let total_pages = sequence.len();
    let signatures = impose_signatures(total_pages, pages_per_booklet)?;

    Ok(BookletStatistics {
        front_pages,
        main_pages,
        back_pages,
        blank_pages_added: sequence.blank_count(),
        total_pages,
        signatures: signatures.len(),
        pages_per_signature: signatures.iter().map(|sig| sig.len).collect(),
        spreads: signatures.iter().map(|sig| sig.pairings.len()).sum(),
        sheets: total_pages / PAGES_PER_SHEET,
    })
}
