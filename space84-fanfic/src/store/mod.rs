//! Artist backing stores
//!
//! A store owns nothing but a directory path. Every call reads the files it
//! needs from disk in one piece, so concurrent requests share no state.

use space84_common::config::BackendKind;
use space84_common::{ArtistRecord, ArtistSummary, Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

pub mod json;
pub mod markdown;

pub use json::JsonStore;
pub use markdown::MarkdownStore;

/// Longest slug accepted before touching the filesystem
pub const MAX_SLUG_LEN: usize = 128;

/// A loaded artist: the normalized record plus the document as the backend
/// shapes it for the record endpoint
#[derive(Debug, Clone)]
pub struct ArtistDocument {
    pub record: ArtistRecord,
    pub raw: serde_json::Value,
}

/// Read-only source of artist records
pub trait ArtistStore: Send + Sync {
    /// Backend format of this store
    fn kind(&self) -> BackendKind;

    /// Load one artist by slug
    ///
    /// Returns `Error::NotFound` when no file exists for the slug and
    /// `Error::Parse` when the file exists but cannot be understood.
    fn load(&self, slug: &str) -> Result<ArtistDocument>;

    /// Summaries of every readable artist in the store
    ///
    /// Returns `Error::Config` when the backing directory is missing.
    /// Individual unreadable files are skipped.
    fn list(&self) -> Result<Vec<ArtistSummary>>;
}

/// Open the store for the configured backend
pub fn open_store(kind: BackendKind, dir: impl Into<PathBuf>) -> Arc<dyn ArtistStore> {
    match kind {
        BackendKind::Json => Arc::new(JsonStore::new(dir)),
        BackendKind::Markdown => Arc::new(MarkdownStore::new(dir)),
    }
}

/// Reject slugs that could escape the backing directory
///
/// Only alphanumerics, `-` and `_` are allowed.
pub fn validate_slug(slug: &str) -> Result<()> {
    let valid = !slug.is_empty()
        && slug.chars().count() <= MAX_SLUG_LEN
        && slug
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("Invalid artist slug '{}'", slug)))
    }
}

/// Read `<dir>/<slug>.<ext>` as a whole string
pub(crate) fn read_record_file(dir: &Path, slug: &str, kind: BackendKind) -> Result<(PathBuf, String)> {
    validate_slug(slug)?;
    let path = dir.join(format!("{}.{}", slug, kind.extension()));

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            debug!("Read artist file {}", path.display());
            Ok((path, content))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::NotFound(format!("Artist '{}' not found", slug)))
        }
        Err(e) => Err(Error::Io(e)),
    }
}

/// File stem used as the fallback slug
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Walk the backing directory and parse every file with the store's extension
///
/// `parse` receives the path and file content. Failures are logged and
/// skipped. Results are sorted by slug.
pub(crate) fn list_dir<F>(dir: &Path, kind: BackendKind, parse: F) -> Result<Vec<ArtistSummary>>
where
    F: Fn(&Path, &str) -> Result<ArtistRecord>,
{
    if !dir.is_dir() {
        warn!("Artists directory not found: {}", dir.display());
        return Err(Error::Config("Artists directory not found".to_string()));
    }

    let mut summaries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!("Skipping unreadable directory entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let matches_ext = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(kind.extension()))
            .unwrap_or(false);
        if !matches_ext || !path.is_file() {
            continue;
        }

        let parsed = std::fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|content| parse(&path, &content));

        match parsed {
            Ok(record) => summaries.push(record.summary()),
            Err(e) => warn!("Skipping artist file {}: {}", path.display(), e),
        }
    }

    summaries.sort_by(|a, b| a.slug.cmp(&b.slug));
    debug!("Listed {} artists from {}", summaries.len(), dir.display());
    Ok(summaries)
}
