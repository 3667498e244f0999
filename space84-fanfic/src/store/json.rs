//! JSON-file backing store
//!
//! Each artist lives in `<dir>/<slug>.json`. The record endpoint serves the
//! document verbatim; the normalized record is mapped from its documented
//! keys with defaults for anything missing.
//!
//! Only the top level has to be an object. A documented key holding an
//! unexpected type falls back to its default, and list entries of the wrong
//! type are dropped, so a hand-edited file never takes the artist offline.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use space84_common::config::BackendKind;
use space84_common::models::{ListenerCount, UNKNOWN_COUNTRY};
use space84_common::{ArtistRecord, ArtistSummary, Error, Result, VideoLink};
use std::path::PathBuf;

use super::{file_stem, list_dir, read_record_file, ArtistDocument, ArtistStore};

/// On-disk shape of an artist JSON document
#[derive(Debug, Default, Deserialize)]
struct ArtistFile {
    #[serde(default, deserialize_with = "or_default")]
    artist_name: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    slug: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    metadata: Option<ArtistFileMetadata>,
    #[serde(default, deserialize_with = "list_of")]
    tracks: Vec<String>,
    #[serde(default, deserialize_with = "list_of")]
    similar_artists: Vec<String>,
    /// Kept as authored; the fanfic endpoint echoes them verbatim
    #[serde(default, deserialize_with = "list_of")]
    youtube_videos: Vec<Value>,
    #[serde(default, deserialize_with = "list_of")]
    images: Vec<String>,
    #[serde(default, deserialize_with = "or_default")]
    spotify_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ArtistFileMetadata {
    /// A bare string is promoted to a one-element list
    #[serde(default, deserialize_with = "list_of")]
    genres: Vec<String>,
    #[serde(default, deserialize_with = "or_default")]
    country: Option<String>,
    #[serde(default)]
    lastfm_listeners: Option<ListenerCount>,
}

/// Deserialize `T`, or fall back to `T::default()` on a type mismatch
fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keep the array entries that deserialize as `T`
///
/// `null` is an empty list; a single non-array value is a one-element list.
fn list_of<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Value::Null => Vec::new(),
        other => serde_json::from_value(other)
            .map(|item| vec![item])
            .unwrap_or_default(),
    };
    Ok(items)
}

/// Store backed by a directory of `.json` artist files
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtistStore for JsonStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Json
    }

    fn load(&self, slug: &str) -> Result<ArtistDocument> {
        let (path, content) = read_record_file(&self.dir, slug, BackendKind::Json)?;
        parse_json_document(&file_stem(&path), &content)
    }

    fn list(&self) -> Result<Vec<ArtistSummary>> {
        list_dir(&self.dir, BackendKind::Json, |path, content| {
            parse_json_document(&file_stem(path), content).map(|doc| doc.record)
        })
    }
}

/// Parse a JSON artist document; `stem` is the file name without extension
pub fn parse_json_document(stem: &str, content: &str) -> Result<ArtistDocument> {
    let raw: Value = serde_json::from_str(content)
        .map_err(|e| Error::Parse(format!("invalid JSON in '{}': {}", stem, e)))?;
    let file: ArtistFile = serde_json::from_value(raw.clone())
        .map_err(|e| Error::Parse(format!("unexpected artist shape in '{}': {}", stem, e)))?;

    let metadata = file.metadata.unwrap_or_default();
    let mut record = ArtistRecord::new(
        file.artist_name.unwrap_or_else(|| stem.to_string()),
        file.slug
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| stem.to_string()),
    );
    record.country = metadata
        .country
        .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());
    record.genres = metadata.genres;
    record.listener_count = metadata.lastfm_listeners;
    record.tracks = file.tracks;
    record.similar_artists = file.similar_artists;
    record.youtube_videos = file
        .youtube_videos
        .into_iter()
        .map(VideoLink::Stored)
        .collect();
    record.images = file.images;
    record.spotify_url = file.spotify_url.filter(|url| !url.is_empty());

    Ok(ArtistDocument { record, raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document_mapping() {
        let content = json!({
            "artist_name": "Test Band",
            "slug": "test-band",
            "metadata": {
                "genres": ["indie", "rock"],
                "country": "KR",
                "lastfm_listeners": 1234
            },
            "tracks": ["Song A", "Song B"],
            "similar_artists": ["A", "B", "C", "D"],
            "youtube_videos": [{"title": "Song A", "video_id": "xyz"}],
            "images": ["https://example.com/a.jpg"],
            "spotify_url": "https://open.spotify.com/artist/abc"
        })
        .to_string();

        let doc = parse_json_document("test-band", &content).unwrap();
        let record = doc.record;
        assert_eq!(record.artist_name, "Test Band");
        assert_eq!(record.country, "KR");
        assert_eq!(record.genres, vec!["indie", "rock"]);
        assert_eq!(record.listener_count, Some(ListenerCount::from(1234u64)));
        assert_eq!(record.tracks_count(), 2);
        assert_eq!(record.similar_artists.len(), 4);
        assert_eq!(
            record.youtube_videos,
            vec![VideoLink::Stored(json!({"title": "Song A", "video_id": "xyz"}))]
        );
        assert_eq!(record.spotify_url.as_deref(), Some("https://open.spotify.com/artist/abc"));
        assert_eq!(doc.raw["metadata"]["lastfm_listeners"], 1234);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let doc = parse_json_document("quiet-one", "{}").unwrap();
        let record = doc.record;
        assert_eq!(record.artist_name, "quiet-one");
        assert_eq!(record.slug, "quiet-one");
        assert_eq!(record.country, "Unknown");
        assert!(record.genres.is_empty());
        assert!(record.tracks.is_empty());
        assert!(record.spotify_url.is_none());
    }

    #[test]
    fn test_explicit_slug_wins_over_file_stem() {
        let doc = parse_json_document("file-name", r#"{"slug": "real-slug"}"#).unwrap();
        assert_eq!(doc.record.slug, "real-slug");
    }

    #[test]
    fn test_single_genre_string_promoted_to_list() {
        let doc = parse_json_document("x", r#"{"metadata": {"genres": "jazz"}}"#).unwrap();
        assert_eq!(doc.record.genres, vec!["jazz"]);
    }

    #[test]
    fn test_null_fields_treated_as_absent() {
        let doc = parse_json_document("x", r#"{"tracks": null, "metadata": null}"#).unwrap();
        assert!(doc.record.tracks.is_empty());
        assert_eq!(doc.record.country, "Unknown");
    }

    #[test]
    fn test_float_and_negative_listener_counts_pass_through() {
        let doc = parse_json_document(
            "x",
            r#"{"artist_name": "X", "metadata": {"lastfm_listeners": 185000.0}, "tracks": ["A"]}"#,
        )
        .unwrap();
        let listeners = doc.record.listener_count.unwrap();
        assert_eq!(listeners.to_string(), "185000.0");
        assert_eq!(doc.record.tracks, vec!["A"]);

        let doc = parse_json_document("y", r#"{"metadata": {"lastfm_listeners": -42}}"#).unwrap();
        assert_eq!(doc.record.listener_count.unwrap().to_string(), "-42");
    }

    #[test]
    fn test_listener_count_of_any_shape_is_kept() {
        let doc = parse_json_document(
            "x",
            r#"{"metadata": {"lastfm_listeners": {"approx": 700}}}"#,
        )
        .unwrap();
        assert_eq!(
            doc.record.listener_count,
            Some(ListenerCount(json!({"approx": 700})))
        );
    }

    #[test]
    fn test_videos_with_embed_and_search_urls_kept_verbatim() {
        let video = json!({
            "title": "T",
            "search_query": "q",
            "embed_url": "https://e",
            "search_url": "https://s"
        });
        let content = json!({"youtube_videos": [video.clone()]}).to_string();

        let doc = parse_json_document("y", &content).unwrap();
        assert_eq!(doc.record.youtube_videos, vec![VideoLink::Stored(video)]);
    }

    #[test]
    fn test_mistyped_optional_fields_fall_back() {
        let content = json!({
            "artist_name": 42,
            "spotify_url": 12345,
            "similar_artists": ["Real Band", 7, null, {"name": "Obj"}],
            "tracks": ["Song A", false, "Song B"],
            "images": "https://example.com/only.jpg",
            "youtube_videos": [{"title": null, "video_id": "abc"}],
            "metadata": {"country": ["KR"], "genres": [1, "pop"]}
        })
        .to_string();

        let doc = parse_json_document("odd-one", &content).unwrap();
        let record = doc.record;
        assert_eq!(record.artist_name, "odd-one");
        assert!(record.spotify_url.is_none());
        assert_eq!(record.similar_artists, vec!["Real Band"]);
        assert_eq!(record.tracks, vec!["Song A", "Song B"]);
        assert_eq!(record.images, vec!["https://example.com/only.jpg"]);
        assert_eq!(record.country, "Unknown");
        assert_eq!(record.genres, vec!["pop"]);
        assert_eq!(
            record.youtube_videos,
            vec![VideoLink::Stored(json!({"title": null, "video_id": "abc"}))]
        );
        assert_eq!(doc.raw["spotify_url"], 12345);
    }

    #[test]
    fn test_non_object_metadata_falls_back() {
        let doc = parse_json_document("x", r#"{"metadata": "KR"}"#).unwrap();
        assert_eq!(doc.record.country, "Unknown");
        assert!(doc.record.genres.is_empty());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            parse_json_document("x", "{ not json"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            parse_json_document("x", r#"["an", "array"]"#),
            Err(Error::Parse(_))
        ));
    }
}
