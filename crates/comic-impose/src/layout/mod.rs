//! Page sequencing for booklet printing
//!
//! This module holds the pure arithmetic of imposition:
//! - Collation of front, main and back matter into a padded sequence
//! - Signature partitioning and fold pairing

mod collate;
mod signature;

pub use collate::*;
pub use signature::*;
