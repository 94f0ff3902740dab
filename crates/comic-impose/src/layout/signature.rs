//! Signature partitioning and fold pairing
//!
//! The collated sequence is cut into signatures of at most
//! `pages_per_booklet` pages. Inside a signature of `n` pages, local page
//! `j` shares a half-sheet with local page `n - 1 - j`:
//!
//! ```text
//! n = 8, local indices:
//!
//! pairing 0: 0 + 7   (outermost sheet, first face)
//! pairing 1: 1 + 6   (outermost sheet, second face)
//! pairing 2: 2 + 5
//! pairing 3: 3 + 4   (innermost sheet, centre spread)
//! ```
//!
//! Pairings are emitted in that order, which is also the printing order.
//!
//! ## Orientation
//!
//! When the first member's global index is even it goes on the left of the
//! spread; when odd the pair is flipped. Duplex printing puts consecutive
//! pairings on the two faces of one sheet, and the flip is what keeps recto
//! and verso in reading order after folding.

use crate::types::*;

// =============================================================================
// Signature Calculation
// =============================================================================

/// Partition `total_pages` into signatures and compute their fold pairings.
///
/// Every signature but the last holds exactly `pages_per_booklet` pages.
pub fn impose_signatures(total_pages: usize, pages_per_booklet: usize) -> Result<Vec<Signature>> {
    if pages_per_booklet == 0 || pages_per_booklet % 2 != 0 {
        return Err(ImposeError::Config(format!(
            "Pages per booklet must be a positive even number, got {pages_per_booklet}"
        )));
    }

    let count = total_pages.div_ceil(pages_per_booklet);
    let mut signatures = Vec::with_capacity(count);

    for index in 0..count {
        let start = index * pages_per_booklet;
        let len = pages_per_booklet.min(total_pages - start);

        if len % 2 != 0 {
            return Err(ImposeError::Invariant(format!(
                "signature {index} has an odd page count ({len})"
            )));
        }

        signatures.push(Signature {
            index,
            start,
            len,
            pairings: fold_pairings(start, len),
        });
    }

    Ok(signatures)
}

// =============================================================================
// Fold Pairing
// =============================================================================

/// Pair a signature's pages from both ends inwards.
///
/// `start` is the global index of the signature's first page, `len` its size.
pub fn fold_pairings(start: usize, len: usize) -> Vec<FoldPairing> {
    (0..len / 2)
        .map(|j| {
            let first = start + j;
            let second = start + len - 1 - j;
            FoldPairing {
                first,
                second,
                orientation: orientation_for(first),
            }
        })
        .collect()
}

/// Orientation of a pairing, decided by its first member's global index
pub fn orientation_for(first: usize) -> Orientation {
    if first % 2 == 0 {
        Orientation::Forward
    } else {
        Orientation::Reversed
    }
}

/// All pairings in final document order
pub fn spread_order(signatures: &[Signature]) -> impl Iterator<Item = &FoldPairing> {
    signatures.iter().flat_map(|sig| sig.pairings.iter())
}

// =============================================================================
// Tests
// =============================================================================
