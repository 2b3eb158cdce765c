// SPDX-License-Identifier: MIT

//! Business logic for bundling the gallery into a ZIP archive.
//!
//! Responsibilities:
//! - Resolve per-entry file names with deterministic collision suffixes.
//! - Fetch every entry concurrently and pack the successful bodies.
//! - Finalize the archive in memory and write it to the chosen path.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures_util::future::join_all;
use zip::{CompressionMethod, write::FileOptions};

use crate::logic::fetch::ImageFetcher;
use crate::models::gallery::ImageEntry;

/// Suggested file name offered in the save dialog.
pub const ARCHIVE_FILE_NAME: &str = "gallery.zip";

/// In-memory ZIP builder keyed by resolved file names.
pub struct ZipBundle {
    writer: zip::ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions<'static, ()>,
}

impl ZipBundle {
    pub fn new() -> Self {
        Self {
            writer: zip::ZipWriter::new(Cursor::new(Vec::new())),
            options: FileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Add one named blob to the archive.
    pub fn add_entry(&mut self, file_name: &str, bytes: &[u8]) -> Result<()> {
        self.writer
            .start_file(file_name, self.options)
            .with_context(|| format!("Failed to add {file_name} to archive"))?;
        self.writer
            .write_all(bytes)
            .with_context(|| format!("Failed to write {file_name} into archive"))?;
        Ok(())
    }

    /// Produce the final archive bytes. An empty bundle finalizes to a valid
    /// empty ZIP.
    pub fn finalize(mut self) -> Result<Vec<u8>> {
        let cursor = self.writer.finish().context("Failed to finalize archive")?;
        Ok(cursor.into_inner())
    }
}

impl Default for ZipBundle {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one export run.
#[derive(Clone, Debug)]
pub struct ExportReport {
    /// Entries whose bytes made it into the archive.
    pub packed: usize,
    /// Entries dropped because their fetch failed.
    pub failed: usize,
    /// Finalized archive payload.
    pub archive: Vec<u8>,
}

/// Resolve archive file names for a snapshot, in snapshot order.
///
/// The base name is the entry's display name, or `no_name_<k>` for unnamed
/// entries where `k` advances once per unnamed entry in encounter order.
/// Collision counting keys on the base name: the n-th use of the same base
/// gets a `_<n>` suffix, so a third occurrence yields `_3` rather than a
/// suffix stacked onto the second occurrence's output. Every name gets a
/// fixed `.jpg` extension regardless of the actual image format.
pub fn resolve_file_names(entries: &[ImageEntry]) -> Vec<String> {
    let mut used: HashMap<String, u32> = HashMap::new();
    let mut anonymous = 1u32;

    entries
        .iter()
        .map(|entry| {
            let base = if entry.display_name.is_empty() {
                let name = format!("no_name_{anonymous}");
                anonymous += 1;
                name
            } else {
                entry.display_name.clone()
            };

            let resolved = match used.get_mut(&base) {
                Some(count) => {
                    *count += 1;
                    format!("{base}_{count}")
                }
                None => {
                    used.insert(base.clone(), 1);
                    base
                }
            };

            format!("{resolved}.jpg")
        })
        .collect()
}

/// Fetch every snapshot entry concurrently and pack the successes.
///
/// All fetches run as concurrently in-flight futures on the calling task;
/// the archive is finalized only once every fetch has settled. A non-success
/// status or transport fault drops that entry from the archive and is logged,
/// but never aborts the export. There is no per-fetch timeout, so a hung
/// fetch postpones finalize indefinitely.
pub async fn export(fetcher: &dyn ImageFetcher, entries: &[ImageEntry]) -> Result<ExportReport> {
    let file_names = resolve_file_names(entries);
    let results = join_all(entries.iter().map(|entry| fetcher.fetch(&entry.source_url))).await;

    let mut bundle = ZipBundle::new();
    let mut packed = 0usize;
    let mut failed = 0usize;

    for ((entry, file_name), result) in entries.iter().zip(&file_names).zip(results) {
        match result {
            Ok(body) if body.is_success() => {
                bundle.add_entry(file_name, &body.bytes)?;
                packed += 1;
            }
            Ok(body) => {
                tracing::warn!(url = %entry.source_url, status = body.status, "fetch rejected, entry dropped from archive");
                failed += 1;
            }
            Err(err) => {
                tracing::warn!(url = %entry.source_url, error = %err, "fetch faulted, entry dropped from archive");
                failed += 1;
            }
        }
    }

    let archive = bundle.finalize()?;
    Ok(ExportReport {
        packed,
        failed,
        archive,
    })
}

/// Write finalized archive bytes to the user-chosen path, creating parent
/// directories when missing.
pub fn write_archive(output: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }
    fs::write(output, bytes).with_context(|| format!("Failed to write archive file {:?}", output))
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps an existing matching extension (case-insensitive); otherwise
/// replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}
