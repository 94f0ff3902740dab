use crate::constants::*;
use crate::types::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which units keep their natural leading-page order.
///
/// The convention is inverted: listing a unit here means "do NOT swap".
/// `none` (or empty) swaps every eligible unit, `all` swaps nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NoSwapSpec {
    #[default]
    None,
    All,
    Units(BTreeSet<String>),
}

impl NoSwapSpec {
    pub fn parse(spec: &str) -> Self {
        let trimmed = spec.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return NoSwapSpec::None;
        }
        if trimmed.eq_ignore_ascii_case("all") {
            return NoSwapSpec::All;
        }

        NoSwapSpec::Units(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Expand into the concrete set of units that must not be swapped
    pub fn resolve(&self, all_units: &BTreeSet<String>) -> DoNotSwapUnits {
        match self {
            NoSwapSpec::None => DoNotSwapUnits::default(),
            NoSwapSpec::All => DoNotSwapUnits(all_units.clone()),
            NoSwapSpec::Units(units) => DoNotSwapUnits(units.clone()),
        }
    }
}

impl std::str::FromStr for NoSwapSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(NoSwapSpec::parse(s))
    }
}

impl std::fmt::Display for NoSwapSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoSwapSpec::None => f.write_str("none"),
            NoSwapSpec::All => f.write_str("all"),
            NoSwapSpec::Units(units) => {
                let joined: Vec<&str> = units.iter().map(String::as_str).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

/// Units excluded from the leading-page swap
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DoNotSwapUnits(BTreeSet<String>);

impl DoNotSwapUnits {
    pub fn contains(&self, unit: &str) -> bool {
        self.0.contains(unit)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn units(&self) -> &BTreeSet<String> {
        &self.0
    }
}

/// Stage one: archives -> normalized page images
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrepareOptions {
    /// Directory holding the `.cbz` archives
    pub input_dir: PathBuf,
    pub page_width: u32,
    pub page_height: u32,
    pub no_swap: NoSwapSpec,
    pub convert_format: PageFormat,
    pub decode_policy: DecodePolicy,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            no_swap: NoSwapSpec::None,
            convert_format: PageFormat::Jpg,
            decode_policy: DecodePolicy::Skip,
        }
    }
}

impl PrepareOptions {
    /// Where extracted pages are written
    pub fn extracted_dir(&self) -> PathBuf {
        self.input_dir.join(EXTRACTED_DIR)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        require_dir("Input", &self.input_dir)?;
        validate_page_size(self.page_width, self.page_height)
    }
}

/// Stage two: normalized pages -> imposed booklet document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookletOptions {
    /// Directory holding the main content pages
    pub processed_dir: PathBuf,
    /// Front matter, printed before the main content
    pub start_pages_dir: PathBuf,
    /// Back matter, printed after the main content
    pub end_pages_dir: PathBuf,
    pub page_width: u32,
    pub page_height: u32,
    pub pages_per_booklet: usize,
    pub document_dpi: f32,
    pub decode_policy: DecodePolicy,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            processed_dir: PathBuf::new(),
            start_pages_dir: PathBuf::new(),
            end_pages_dir: PathBuf::new(),
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            pages_per_booklet: DEFAULT_PAGES_PER_BOOKLET,
            document_dpi: DEFAULT_DOCUMENT_DPI,
            decode_policy: DecodePolicy::Skip,
        }
    }
}

impl BookletOptions {
    pub fn booklets_dir(&self) -> PathBuf {
        self.processed_dir.join(BOOKLETS_DIR)
    }

    pub fn document_path(&self) -> PathBuf {
        self.processed_dir.join(DOCUMENT_FILE)
    }

    /// Validate the numeric layout settings only
    pub fn validate_layout(&self) -> Result<()> {
        validate_page_size(self.page_width, self.page_height)?;

        if self.pages_per_booklet == 0 || self.pages_per_booklet % 2 != 0 {
            return Err(ImposeError::Config(format!(
                "Pages per booklet must be a positive even number, got {}",
                self.pages_per_booklet
            )));
        }

        if self.document_dpi.is_nan() || self.document_dpi <= 0.0 {
            return Err(ImposeError::Config(format!(
                "Document DPI must be positive, got {}",
                self.document_dpi
            )));
        }

        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        require_dir("Processed", &self.processed_dir)?;
        require_dir("Start pages", &self.start_pages_dir)?;
        require_dir("End pages", &self.end_pages_dir)?;
        self.validate_layout()
    }
}

/// Both stages back to back; the booklet stage reads what preparation wrote
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunOptions {
    pub prepare: PrepareOptions,
    pub booklet: BookletOptions,
}

impl RunOptions {
    /// Chain the stages: the processed directory is the extraction directory
    /// and both stages share one page size and decode policy.
    pub fn new(prepare: PrepareOptions, start_pages_dir: PathBuf, end_pages_dir: PathBuf) -> Self {
        let booklet = BookletOptions {
            processed_dir: prepare.extracted_dir(),
            start_pages_dir,
            end_pages_dir,
            page_width: prepare.page_width,
            page_height: prepare.page_height,
            decode_policy: prepare.decode_policy,
            ..Default::default()
        };
        Self { prepare, booklet }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate before anything is written. The processed directory does not
    /// exist yet, so only the booklet layout and matter directories are checked.
    pub fn validate(&self) -> Result<()> {
        self.prepare.validate()?;
        require_dir("Start pages", &self.booklet.start_pages_dir)?;
        require_dir("End pages", &self.booklet.end_pages_dir)?;
        self.booklet.validate_layout()
    }
}

fn require_dir(role: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ImposeError::Config(format!("{role} directory not specified")));
    }
    if !path.is_dir() {
        return Err(ImposeError::Config(format!(
            "{role} directory '{}' does not exist or is not a directory",
            path.display()
        )));
    }
    Ok(())
}

fn validate_page_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ImposeError::Config(format!(
            "Page size must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    // Stored as the same string the command line accepts
    impl Serialize for NoSwapSpec {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for NoSwapSpec {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Ok(NoSwapSpec::parse(&s))
        }
    }
}
