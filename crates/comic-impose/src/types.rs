use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, ImposeError>;

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)$").expect("valid trailing number pattern"));

static DOUBLE_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)-(\d+)$").expect("valid double page pattern"));

static LEADING_ONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+1$").expect("valid leading page pattern"));

/// Image encodings a page may be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageFormat {
    #[default]
    Jpg,
    Png,
    Webp,
}

impl PageFormat {
    /// Canonical file extension (without the dot)
    pub fn extension(self) -> &'static str {
        match self {
            PageFormat::Jpg => "jpg",
            PageFormat::Png => "png",
            PageFormat::Webp => "webp",
        }
    }

    /// Recognise a supported page extension, case-insensitively
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(PageFormat::Jpg),
            "png" => Some(PageFormat::Png),
            "webp" => Some(PageFormat::Webp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            PageFormat::Jpg => image::ImageFormat::Jpeg,
            PageFormat::Png => image::ImageFormat::Png,
            PageFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

/// What to do when a single page cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DecodePolicy {
    /// Log a warning and leave the page as it is
    #[default]
    Skip,
    /// Stop the stage with a `Decode` error
    Abort,
}

/// The trailing page number of a page label, digits kept verbatim so
/// zero-padding survives renames (`04` stays `04`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageNumber(String);

impl PageNumber {
    /// Take the trailing decimal token of a label, if any
    pub fn from_label(label: &str) -> Option<Self> {
        TRAILING_NUMBER
            .captures(label)
            .map(|caps| PageNumber(caps[1].to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Numeric value, saturating on absurdly long tokens
    pub fn value(&self) -> u64 {
        self.0.parse().unwrap_or(u64::MAX)
    }

    /// `01`, `001`, `0001`, ... (a single `1` does not qualify)
    pub fn is_leading_one(&self) -> bool {
        LEADING_ONE.is_match(&self.0)
    }

    /// The same-width sibling with the final digit dropped to zero
    /// (`01` -> `00`, `001` -> `000`)
    pub fn zeroed(&self) -> PageNumber {
        let mut digits = self.0.clone();
        digits.pop();
        digits.push('0');
        PageNumber(digits)
    }
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One rasterizable page on disk, tagged with the unit (source archive) it
/// came from. Files are named `<unit>_<label>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub unit: String,
    pub label: String,
    pub extension: String,
    pub number: Option<PageNumber>,
    pub path: PathBuf,
}

impl Page {
    /// Build a page inside `dir` from its parts
    pub fn new(dir: &Path, unit: &str, label: &str, extension: &str) -> Self {
        Self {
            unit: unit.to_string(),
            label: label.to_string(),
            extension: extension.to_string(),
            number: PageNumber::from_label(label),
            path: dir.join(Self::file_name_for(unit, label, extension)),
        }
    }

    pub fn file_name_for(unit: &str, label: &str, extension: &str) -> String {
        format!("{unit}_{label}.{extension}")
    }

    pub fn file_name(&self) -> String {
        Self::file_name_for(&self.unit, &self.label, &self.extension)
    }

    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub fn format(&self) -> Option<PageFormat> {
        PageFormat::from_extension(&self.extension)
    }

    /// A sibling page in the same directory and unit with a different label
    pub fn sibling(&self, label: &str) -> Page {
        Page::new(self.dir(), &self.unit, label, &self.extension)
    }

    /// The two page numbers of a merged double page (`p3-04` -> `3`, `04`)
    pub fn double_page_numbers(&self) -> Option<(PageNumber, PageNumber)> {
        DOUBLE_PAGE.captures(&self.label).map(|caps| {
            (
                PageNumber(caps[1].to_string()),
                PageNumber(caps[2].to_string()),
            )
        })
    }

    /// Label text before the page number, when the number is a standalone
    /// `_`-separated token (`01` -> `""`, `page_01` -> `"page_"`, `p01` -> none)
    fn number_prefix(&self) -> Option<&str> {
        let number = self.number.as_ref()?;
        let prefix = self.label.strip_suffix(number.as_str())?;
        (prefix.is_empty() || prefix.ends_with('_')).then_some(prefix)
    }

    /// Whether the page number stands alone as the label's last token
    pub fn has_standalone_number(&self) -> bool {
        self.number_prefix().is_some()
    }

    /// The sibling whose standalone page number is `number`, the rest of the
    /// label unchanged (`page_01` -> `page_00`)
    pub fn renumbered(&self, number: &PageNumber) -> Option<Page> {
        self.number_prefix()
            .map(|prefix| self.sibling(&format!("{prefix}{number}")))
    }
}

/// Which side of a spread the first member of a pairing lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// First member left (outer), second member right (inner)
    Forward,
    /// Second member left (outer), first member right (inner)
    Reversed,
}

/// Two pages of one signature that print side by side on a half-sheet.
/// Members are global indices into the collated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldPairing {
    pub first: usize,
    pub second: usize,
    pub orientation: Orientation,
}

impl FoldPairing {
    /// Global index rendered on the left half of the spread
    pub fn left(&self) -> usize {
        match self.orientation {
            Orientation::Forward => self.first,
            Orientation::Reversed => self.second,
        }
    }

    /// Global index rendered on the right half of the spread
    pub fn right(&self) -> usize {
        match self.orientation {
            Orientation::Forward => self.second,
            Orientation::Reversed => self.first,
        }
    }
}

/// A contiguous run of the collated sequence folded as one booklet section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub index: usize,
    /// Global index of the first page
    pub start: usize,
    pub len: usize,
    pub pairings: Vec<FoldPairing>,
}

/// Statistics about a planned booklet
#[derive(Debug, Clone, PartialEq)]
pub struct BookletStatistics {
    pub front_pages: usize,
    pub main_pages: usize,
    pub back_pages: usize,
    /// Blank pages inserted after the front matter and before the back matter
    pub blank_pages_added: usize,
    /// Length of the collated sequence
    pub total_pages: usize,
    pub signatures: usize,
    pub pages_per_signature: Vec<usize>,
    /// Two-up spreads (output document pages)
    pub spreads: usize,
    /// Physical duplex sheets
    pub sheets: usize,
}
