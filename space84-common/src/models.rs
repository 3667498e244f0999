//! Normalized artist data model
//!
//! Every backing store produces these shapes regardless of how the artist
//! was authored on disk. Records are built fresh per request and never
//! mutated after loading.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Country used when a record does not declare one
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Last.fm style listener count, passed through as authored
///
/// Any JSON value is accepted; strings render without quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerCount(pub Value);

impl From<u64> for ListenerCount {
    fn from(count: u64) -> Self {
        ListenerCount(Value::from(count))
    }
}

impl From<&str> for ListenerCount {
    fn from(text: &str) -> Self {
        ListenerCount(Value::from(text))
    }
}

impl fmt::Display for ListenerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Search-results link synthesized for a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YoutubeVideo {
    pub title: String,
    pub search_query: String,
    pub url: String,
}

/// A video entry: either stored with the artist (served verbatim) or a
/// synthesized search link
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VideoLink {
    Stored(Value),
    Search(YoutubeVideo),
}

/// Normalized in-memory artist record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistRecord {
    pub artist_name: String,
    pub slug: String,
    pub country: String,
    pub genres: Vec<String>,
    pub tracks: Vec<String>,
    pub similar_artists: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_count: Option<ListenerCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    pub youtube_videos: Vec<VideoLink>,
    pub images: Vec<String>,
}

impl ArtistRecord {
    /// Create an empty record with defaults for everything except identity
    pub fn new(artist_name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            artist_name: artist_name.into(),
            slug: slug.into(),
            country: UNKNOWN_COUNTRY.to_string(),
            genres: Vec::new(),
            tracks: Vec::new(),
            similar_artists: Vec::new(),
            listener_count: None,
            spotify_url: None,
            youtube_videos: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn tracks_count(&self) -> usize {
        self.tracks.len()
    }

    /// Lightweight catalog entry for this record
    pub fn summary(&self) -> ArtistSummary {
        ArtistSummary {
            name: self.artist_name.clone(),
            slug: self.slug.clone(),
            tracks_count: self.tracks_count(),
        }
    }
}

/// Catalog entry returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub name: String,
    pub slug: String,
    pub tracks_count: usize,
}

/// Full catalog response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCatalog {
    pub artists: Vec<ArtistSummary>,
    pub total: usize,
}

impl From<Vec<ArtistSummary>> for ArtistCatalog {
    fn from(artists: Vec<ArtistSummary>) -> Self {
        let total = artists.len();
        Self { artists, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_record_defaults() {
        let record = ArtistRecord::new("Test Band", "test-band");
        assert_eq!(record.country, "Unknown");
        assert!(record.tracks.is_empty());
        assert_eq!(record.tracks_count(), 0);
        assert!(record.listener_count.is_none());
    }

    #[test]
    fn test_summary_counts_tracks() {
        let mut record = ArtistRecord::new("Test Band", "test-band");
        record.tracks = vec!["Song A".to_string(), "Song B".to_string()];

        let summary = record.summary();
        assert_eq!(summary.name, "Test Band");
        assert_eq!(summary.slug, "test-band");
        assert_eq!(summary.tracks_count, 2);
    }

    #[test]
    fn test_listener_count_accepts_any_value() {
        let n: ListenerCount = serde_json::from_str("1234").unwrap();
        assert_eq!(n, ListenerCount::from(1234u64));
        assert_eq!(n.to_string(), "1234");

        let t: ListenerCount = serde_json::from_str("\"1.2K\"").unwrap();
        assert_eq!(t.to_string(), "1.2K");

        let f: ListenerCount = serde_json::from_str("185000.0").unwrap();
        assert_eq!(f.to_string(), "185000.0");

        let neg: ListenerCount = serde_json::from_str("-3").unwrap();
        assert_eq!(neg.to_string(), "-3");

        let b: ListenerCount = serde_json::from_str("true").unwrap();
        assert_eq!(b.to_string(), "true");
    }

    #[test]
    fn test_video_links_serialize_untagged() {
        let stored = VideoLink::Stored(json!({"title": "Live", "video_id": "abc", "extra": 1}));
        assert_eq!(
            serde_json::to_value(&stored).unwrap(),
            json!({"title": "Live", "video_id": "abc", "extra": 1})
        );

        let search = VideoLink::Search(YoutubeVideo {
            title: "Song".to_string(),
            search_query: "q".to_string(),
            url: "https://www.youtube.com/results?search_query=q".to_string(),
        });
        assert_eq!(serde_json::to_value(&search).unwrap()["search_query"], "q");
    }

    #[test]
    fn test_catalog_total_matches_entries() {
        let catalog = ArtistCatalog::from(vec![
            ArtistRecord::new("A", "a").summary(),
            ArtistRecord::new("B", "b").summary(),
        ]);
        assert_eq!(catalog.total, 2);

        let empty = ArtistCatalog::from(Vec::new());
        assert_eq!(empty.total, 0);
        assert!(empty.artists.is_empty());
    }

    #[test]
    fn test_spotify_url_omitted_when_absent() {
        let record = ArtistRecord::new("A", "a");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("spotify_url").is_none());
    }
}
