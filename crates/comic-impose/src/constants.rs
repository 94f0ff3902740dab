//! Shared constants for booklet preparation and imposition
//!
//! This module centralizes defaults, file names and magic numbers used
//! throughout both stages.

// =============================================================================
// Page Geometry
// =============================================================================

/// Default target page width in pixels
pub const DEFAULT_PAGE_WIDTH: u32 = 1000;

/// Default target page height in pixels
pub const DEFAULT_PAGE_HEIGHT: u32 = 1500;

/// Default number of pages folded together into one booklet section
pub const DEFAULT_PAGES_PER_BOOKLET: usize = 24;

/// Printed page faces contributed by one folded sheet
pub const PAGES_PER_SHEET: usize = 4;

// =============================================================================
// Encoding
// =============================================================================

/// Quality used for every lossy JPEG encode
pub const JPEG_QUALITY: u8 = 95;

/// Default document resolution; at 72 DPI one pixel maps to one point
pub const DEFAULT_DOCUMENT_DPI: f32 = 72.0;

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert a pixel length to points at the given resolution
#[inline]
pub fn px_to_pt(px: u32, dpi: f32) -> f32 {
    px as f32 * POINTS_PER_INCH / dpi
}

// =============================================================================
// Directory Layout
// =============================================================================

/// Extension of the archives picked up from the input directory
pub const ARCHIVE_EXTENSION: &str = "cbz";

/// Stage one output, created inside the input directory
pub const EXTRACTED_DIR: &str = "extracted";

/// Scaled copies of the front matter, inside the processed directory
pub const SCALED_START_DIR: &str = "scaled_start";

/// Scaled copies of the back matter, inside the processed directory
pub const SCALED_END_DIR: &str = "scaled_end";

/// Synthesized blank pages, inside the processed directory
pub const BLANKS_DIR: &str = "blanks";

/// Composited spreads, inside the processed directory
pub const BOOKLETS_DIR: &str = "booklets";

/// File name prefix of every composited spread
pub const SPREAD_PREFIX: &str = "booklet_";

/// Final document, inside the processed directory
pub const DOCUMENT_FILE: &str = "booklet.pdf";

/// Title embedded in the final document
pub const DOCUMENT_TITLE: &str = "Booklet";
