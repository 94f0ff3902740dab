//! Archive extraction: every entry of `<unit>.cbz` becomes `<unit>_<entry>`

use crate::constants::ARCHIVE_EXTENSION;
use crate::types::*;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Pages produced from one archive
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedUnit {
    pub unit: String,
    pub pages: Vec<Page>,
    /// Entries written out that are not page images (metadata and such)
    pub other_files: Vec<PathBuf>,
    /// Entries that could not be read and were left out
    pub skipped_entries: Vec<String>,
}

/// List the archives in `input_dir`, sorted by file name
pub fn list_archives(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        let is_archive = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION));
        if is_archive && path.is_file() {
            archives.push(path);
        }
    }
    archives.sort();
    Ok(archives)
}

/// Unit identifier of an archive: its file stem
pub fn unit_name(archive: &Path) -> Option<String> {
    archive
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Extract every file entry of `archive` into `extract_to`.
///
/// Directory entries are skipped and any directory components of an entry
/// path are dropped, so `chapter/p1.jpg` lands as `<unit>_p1.jpg`. An entry
/// that fails to read (bad checksum, unsupported compression) is removed
/// again and, under [`DecodePolicy::Skip`], left out while the rest of the
/// archive is extracted.
pub fn extract_archive(
    archive: &Path,
    extract_to: &Path,
    policy: DecodePolicy,
) -> Result<ExtractedUnit> {
    let unit = unit_name(archive).ok_or_else(|| {
        ImposeError::Config(format!("Archive '{}' has no usable name", archive.display()))
    })?;

    let reader = BufReader::new(File::open(archive)?);
    let mut zip = ZipArchive::new(reader)?;

    let mut pages = Vec::new();
    let mut other_files = Vec::new();
    let mut skipped_entries = Vec::new();

    for i in 0..zip.len() {
        let mut entry = match zip.by_index(i) {
            Ok(entry) => entry,
            Err(err) if policy == DecodePolicy::Skip => {
                log::warn!("Skipping unreadable entry {i} of {}: {err}", archive.display());
                skipped_entries.push(format!("#{i}"));
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if entry.is_dir() {
            continue;
        }

        let raw_name = entry.name().to_string();
        let Some(file_name) = entry_file_name(&raw_name) else {
            log::warn!("Skipping entry with unusable name: {raw_name}");
            continue;
        };

        let target = extract_to.join(format!("{unit}_{file_name}"));
        if let Err(err) = write_entry(&mut entry, &target) {
            let _ = std::fs::remove_file(&target);
            if policy == DecodePolicy::Abort {
                return Err(err);
            }
            log::warn!("Skipping unreadable entry {raw_name} of {}: {err}", archive.display());
            skipped_entries.push(raw_name);
            continue;
        }

        let entry_path = Path::new(&file_name);
        let extension = entry_path.extension().and_then(|ext| ext.to_str());
        let stem = entry_path.file_stem().and_then(|stem| stem.to_str());
        match (stem, extension) {
            (Some(stem), Some(ext)) if PageFormat::from_extension(ext).is_some() => {
                pages.push(Page::new(extract_to, &unit, stem, ext));
            }
            _ => other_files.push(target),
        }
    }

    log::info!(
        "Extracted: {} -> {} ({} pages)",
        archive.display(),
        extract_to.display(),
        pages.len()
    );

    Ok(ExtractedUnit {
        unit,
        pages,
        other_files,
        skipped_entries,
    })
}

/// Copy one entry to `target`; the zip reader checks the CRC at the end
fn write_entry(entry: &mut impl io::Read, target: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(target)?);
    io::copy(entry, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Last path component of an archive entry name
fn entry_file_name(raw_name: &str) -> Option<String> {
    Path::new(raw_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && *name != "..")
        .map(str::to_string)
}
