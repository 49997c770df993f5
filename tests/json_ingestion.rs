use std::fs;

use movie_enrichment::ingestion::json::{
    genre_lookup_from_genre_file, genre_lookup_from_reference, load_json_document,
    valid_writer_ids,
};
use movie_enrichment::EnrichError;

#[test]
fn load_writers_document_happy_path() {
    let doc = load_json_document("tests/fixtures/writters.json").unwrap();
    let ids = valid_writer_ids(&doc).unwrap();
    assert_eq!(ids.len(), 5);
    assert!(ids.contains("nm0000175"));
    assert!(!ids.contains("nm0001104"));
}

#[test]
fn reference_document_drives_genre_lookup() {
    let doc = load_json_document("tests/fixtures/desired_output.json").unwrap();
    let lookup = genre_lookup_from_reference(&doc).unwrap();
    assert_eq!(lookup.len(), 7);
    assert_eq!(
        lookup.get("tt0111161"),
        ["Prison".to_string(), "Period Drama".to_string()]
    );
    assert!(lookup.get("tt0109830").is_empty());
    assert!(lookup.get("tt0245429").is_empty());
}

#[test]
fn genre_file_lookup_uses_its_own_entries() {
    let doc = load_json_document("tests/fixtures/genre.json").unwrap();
    let lookup = genre_lookup_from_genre_file(&doc).unwrap();
    assert_eq!(lookup.get("tt0111161"), ["Prison Drama".to_string()]);
    assert!(lookup.get("tt0110912").is_empty());
}

#[test]
fn missing_and_malformed_documents_fail_differently() {
    let missing = load_json_document("tests/fixtures/nope.json").unwrap_err();
    assert!(matches!(missing, EnrichError::NotFound { .. }));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{\"id\": \"tt1\",").unwrap();
    let malformed = load_json_document(&path).unwrap_err();
    assert!(matches!(malformed, EnrichError::Json { .. }));
    let msg = malformed.to_string();
    assert!(msg.contains("json decode error"));
    assert!(msg.contains("broken.json"));
}

#[test]
fn reference_must_be_an_array() {
    let doc = serde_json::json!({"id": "tt1", "extra_genres": []});
    let err = genre_lookup_from_reference(&doc).unwrap_err();
    assert!(err.to_string().contains("schema mismatch"));
}
