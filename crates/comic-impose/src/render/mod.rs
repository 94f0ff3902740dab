//! Raster rendering for imposition
//!
//! This module handles everything that touches pixels or output files:
//! - Decoding and encoding page images
//! - Composing two-up spreads
//! - Assembling spreads into the final document

pub mod codec;
mod document;
mod spread;

pub use document::{document_bytes, save_document};
pub use spread::{SpreadCounter, compose_spread, render_spreads};
