//! Export archive handling
//!
//! Exports are standard ZIP archives. This module extracts them into a work
//! directory and prepares the output directories next to the extracted tree.

use crate::error::{Error, Result};
use crate::utils::format_size;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Subdirectory of the work directory receiving CSV output
pub const CSV_DIR: &str = "csv";
/// Subdirectory of the work directory receiving debug dumps
pub const DATA_DIR: &str = "data";

/// Entry information from an export archive
#[derive(Debug, Clone)]
pub struct ArchiveEntryInfo {
    /// Entry name/path within the archive
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

/// Suffix of the work directory for archives without an extension
pub const WORK_DIR_SUFFIX: &str = "d";

/// Default work directory for an archive: `<archive dir>/<archive stem>`
///
/// An archive without an extension would collide with its own stem, so
/// `<archive dir>/<archive name>.d` is used instead.
pub fn default_work_dir(archive_path: &Path) -> PathBuf {
    let stem = archive_path.file_stem().unwrap_or_default();
    let mut name = stem.to_os_string();
    if archive_path.extension().is_none() {
        name.push(".");
        name.push(WORK_DIR_SUFFIX);
    }
    archive_path
        .parent()
        .map(|parent| parent.join(&name))
        .unwrap_or_else(|| PathBuf::from(name))
}

fn open_archive(archive_path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(archive_path)?;
    ZipArchive::new(file).map_err(|_| Error::NotAnArchive(archive_path.to_path_buf()))
}

/// List file entries of an archive without extracting
pub fn list_entries(archive_path: &Path) -> Result<Vec<ArchiveEntryInfo>> {
    let mut archive = open_archive(archive_path)?;
    let mut entries = Vec::new();

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() || entry.name().is_empty() {
            continue;
        }
        entries.push(ArchiveEntryInfo {
            name: entry.name().to_string(),
            size: entry.size(),
        });
    }

    Ok(entries)
}

/// Extract an export archive into `output_dir`
///
/// Entries whose names would escape `output_dir` are skipped. Existing files
/// are overwritten. When `debug` is set, the archive contents are printed
/// first.
///
/// # Returns
/// Number of files extracted
pub fn extract_archive(archive_path: &Path, output_dir: &Path, debug: bool) -> Result<usize> {
    let mut archive = open_archive(archive_path)?;

    if debug {
        println!("{:<60} {:>12}", "File Name", "Size");
        for entry in list_entries(archive_path)? {
            println!("{:<60} {:>12}", entry.name, format_size(entry.size));
        }
    }

    fs::create_dir_all(output_dir)?;
    let mut extracted_count = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping unsafe archive entry {:?}", entry.name());
            continue;
        };
        let destination_path = output_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&destination_path)?;
            continue;
        }

        if let Some(parent) = destination_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output_file = File::create(&destination_path)?;
        io::copy(&mut entry, &mut output_file)?;
        extracted_count += 1;
    }

    debug!(
        "Extracted {} files from {} to {}",
        extracted_count,
        archive_path.display(),
        output_dir.display()
    );
    Ok(extracted_count)
}

/// Create the `csv` and `data` directories inside the work directory
///
/// # Returns
/// Paths of the csv and data directories
pub fn ensure_directories(work_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let csv_dir = work_dir.join(CSV_DIR);
    let data_dir = work_dir.join(DATA_DIR);
    fs::create_dir_all(&csv_dir)?;
    fs::create_dir_all(&data_dir)?;
    Ok((csv_dir, data_dir))
}
