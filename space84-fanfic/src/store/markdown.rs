//! Markdown-file backing store
//!
//! Each artist lives in `<dir>/<slug>.md`: frontmatter for the scalar
//! fields, a playlist section for tracks and a similar-artists section of
//! numbered links. Video links are never stored here; the fanfic endpoint
//! synthesizes them.

use space84_common::config::BackendKind;
use space84_common::models::{ListenerCount, UNKNOWN_COUNTRY};
use space84_common::{ArtistRecord, ArtistSummary, Error, Result};
use std::path::PathBuf;

use super::{file_stem, list_dir, read_record_file, ArtistDocument, ArtistStore};
use crate::markdown::parse_document;

const TRACK_SECTIONS: &[&str] = &["playlist", "tracks"];
const SIMILAR_SECTIONS: &[&str] = &["similar"];

/// Store backed by a directory of `.md` artist pages
#[derive(Debug, Clone)]
pub struct MarkdownStore {
    dir: PathBuf,
}

impl MarkdownStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtistStore for MarkdownStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Markdown
    }

    fn load(&self, slug: &str) -> Result<ArtistDocument> {
        let (path, content) = read_record_file(&self.dir, slug, BackendKind::Markdown)?;
        let record = parse_markdown_record(&file_stem(&path), &content)?;
        let raw = raw_document(&record)?;
        Ok(ArtistDocument { record, raw })
    }

    fn list(&self) -> Result<Vec<ArtistSummary>> {
        list_dir(&self.dir, BackendKind::Markdown, |path, content| {
            parse_markdown_record(&file_stem(path), content)
        })
    }
}

/// Build a record from a Markdown artist page; `stem` is the file name
/// without extension
pub fn parse_markdown_record(stem: &str, content: &str) -> Result<ArtistRecord> {
    let doc = parse_document(content)
        .map_err(|e| Error::Parse(format!("artist page '{}': {}", stem, e)))?;
    let fm = &doc.frontmatter;

    let mut record = ArtistRecord::new(
        fm.scalar(&["artist_name", "name"]).unwrap_or(stem),
        fm.scalar(&["slug"]).unwrap_or(stem),
    );
    record.country = fm
        .scalar(&["country"])
        .unwrap_or(UNKNOWN_COUNTRY)
        .to_string();
    record.genres = fm.list(&["genres", "genre"]);
    record.listener_count = fm
        .scalar(&["listeners", "lastfm_listeners"])
        .map(parse_listener_count);
    record.spotify_url = fm.scalar(&["spotify_url"]).map(str::to_string);
    record.images = fm.list(&["images"]);
    record.tracks = doc
        .section(TRACK_SECTIONS)
        .map(|section| section.bullet_items())
        .unwrap_or_default();
    record.similar_artists = doc
        .section(SIMILAR_SECTIONS)
        .map(|section| section.numbered_link_names())
        .unwrap_or_default();

    Ok(record)
}

fn parse_listener_count(value: &str) -> ListenerCount {
    let digits: String = value.chars().filter(|c| *c != ',').collect();
    digits
        .parse::<u64>()
        .map(ListenerCount::from)
        .unwrap_or_else(|_| ListenerCount::from(value))
}

/// Markdown records are served as the normalized record plus a track count
fn raw_document(record: &ArtistRecord) -> Result<serde_json::Value> {
    let mut raw = serde_json::to_value(record)
        .map_err(|e| Error::Parse(format!("serialize '{}': {}", record.slug, e)))?;
    if let Some(object) = raw.as_object_mut() {
        object.remove("youtube_videos");
        object.insert("tracks_count".to_string(), record.tracks_count().into());
    }
    Ok(raw)
}
