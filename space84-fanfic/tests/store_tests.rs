//! Backing store tests against real directories

use space84_common::config::BackendKind;
use space84_common::Error;
use space84_fanfic::store::{open_store, ArtistStore, JsonStore, MarkdownStore};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_json_load_round_trips_identity() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("test-band.json"),
        r#"{"artist_name": "Test Band", "slug": "test-band", "tracks": ["A", "B", "C"]}"#,
    )
    .unwrap();

    let store = JsonStore::new(dir.path());
    let doc = store.load("test-band").unwrap();
    assert_eq!(doc.record.slug, "test-band");
    assert_eq!(doc.record.artist_name, "Test Band");
    assert_eq!(doc.record.tracks_count(), doc.record.tracks.len());
    assert_eq!(doc.record.tracks_count(), 3);
}

#[test]
fn test_markdown_load_round_trips_identity() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("test-band.md"),
        "---\nartist_name: Test Band\n---\n## Tracks\n- A\n",
    )
    .unwrap();

    let store = MarkdownStore::new(dir.path());
    let doc = store.load("test-band").unwrap();
    assert_eq!(doc.record.slug, "test-band");
    assert_eq!(doc.record.artist_name, "Test Band");
    assert_eq!(doc.record.tracks, vec!["A"]);
}

#[test]
fn test_absent_slug_is_not_found_for_both_backends() {
    let dir = TempDir::new().unwrap();
    for kind in [BackendKind::Json, BackendKind::Markdown] {
        let store = open_store(kind, dir.path());
        assert_eq!(store.kind(), kind);
        assert!(matches!(store.load("ghost"), Err(Error::NotFound(_))));
    }
}

#[test]
fn test_list_only_reads_own_extension() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.json"), r#"{"artist_name": "A"}"#).unwrap();
    fs::write(dir.path().join("b.md"), "---\nartist_name: B\n---\n").unwrap();

    let json = JsonStore::new(dir.path()).list().unwrap();
    assert_eq!(json.len(), 1);
    assert_eq!(json[0].name, "A");

    let markdown = MarkdownStore::new(dir.path()).list().unwrap();
    assert_eq!(markdown.len(), 1);
    assert_eq!(markdown[0].name, "B");
}

#[test]
fn test_list_missing_directory_is_config_error() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path().join("nope"));
    assert!(matches!(store.list(), Err(Error::Config(_))));
}

#[test]
fn test_list_ignores_subdirectories() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested.json")).unwrap();
    fs::write(dir.path().join("real.json"), "{}").unwrap();

    let summaries = JsonStore::new(dir.path()).list().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].slug, "real");
}
