use std::fs;
use std::path::{Path, PathBuf};

use movie_enrichment::ingestion::InputPaths;
use movie_enrichment::processing::round_to;
use movie_enrichment::types::{OutputRecord, ReceptionCategory};
use movie_enrichment::{run_pipeline, GenreSource, PipelineOptions};

fn fixture_inputs() -> InputPaths {
    InputPaths {
        movies: PathBuf::from("tests/fixtures/movies.csv"),
        genres: PathBuf::from("tests/fixtures/genre.json"),
        writers: PathBuf::from("tests/fixtures/writters.json"),
        reference: PathBuf::from("tests/fixtures/desired_output.json"),
    }
}

fn quiet_options(output_path: &Path) -> PipelineOptions {
    PipelineOptions {
        inputs: fixture_inputs(),
        output_path: output_path.to_path_buf(),
        observer: None,
        ..Default::default()
    }
}

fn read_records(path: &Path) -> Vec<OutputRecord> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn output_matches_reference_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output_refined.json");

    let report = run_pipeline(&quiet_options(&out)).unwrap();

    assert_eq!(report.rows_read, 8);
    assert_eq!(report.records_written, 7);
    assert_eq!(report.rows_skipped, 1);
    assert_eq!(report.list_mismatches, 2);
    assert!(report.matches_reference);
    assert_eq!(report.output_path, out);

    let expected = fs::read("tests/fixtures/desired_output.json").unwrap();
    let actual = fs::read(&out).unwrap();
    assert_eq!(String::from_utf8(actual).unwrap(), String::from_utf8(expected).unwrap());
}

#[test]
fn running_twice_is_byte_identical_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    fs::write(&out, "stale content that is much longer than nothing at all").unwrap();

    run_pipeline(&quiet_options(&out)).unwrap();
    let first = fs::read(&out).unwrap();
    run_pipeline(&quiet_options(&out)).unwrap();
    let second = fs::read(&out).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with(b"[\n  {\n    \"rank\": 1,"));
}

#[test]
fn records_satisfy_derived_field_rules() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    run_pipeline(&quiet_options(&out)).unwrap();

    let records = read_records(&out);
    assert_eq!(records.len(), 7);
    for r in &records {
        let diff = r.reception.rating_difference;
        assert_eq!(diff, round_to(r.imdb_rating - r.reception.year_average_rating, 2));
        let expected_category = if diff > 0.5 {
            ReceptionCategory::AboveAverage
        } else if diff < -0.5 {
            ReceptionCategory::BelowAverage
        } else {
            ReceptionCategory::Average
        };
        assert_eq!(r.reception.category, expected_category, "{}", r.id);
        assert_eq!(r.duration_hours, round_to(r.duration as f64 / 60.0, 2));
        assert_eq!(r.rating_percentage, round_to(r.imdb_rating * 10.0, 1));
        assert_eq!(
            r.popularity_score,
            round_to(r.imdb_rating * r.imdb_votes as f64 / 1000.0, 2)
        );
        assert!(r.release_date.starts_with(&r.year.to_string()));
        assert!(r.release_date.ends_with("-01-01"));
    }

    let by_id = |id: &str| records.iter().find(|r| r.id == id).unwrap();
    assert_eq!(by_id("tt0111161").reception.category, ReceptionCategory::AboveAverage);
    assert_eq!(by_id("tt0109686").reception.category, ReceptionCategory::BelowAverage);
    assert_eq!(by_id("tt0111161").reception.year_average_rating, 8.58);
    assert!(by_id("tt0110912").cast.is_empty());
    assert_eq!(by_id("tt0110912").writers.len(), 2);
    assert!(by_id("tt0109830").writers.is_empty());
    assert!(records.iter().all(|r| r.id != "tt0245429"));
}

#[test]
fn yearly_average_includes_ratings_of_skipped_rows() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    run_pipeline(&quiet_options(&out)).unwrap();

    let amelie = read_records(&out)
        .into_iter()
        .find(|r| r.id == "tt0211915")
        .unwrap();
    // (8.6 from the skipped row + 8.3) / 2
    assert_eq!(amelie.reception.year_average_rating, 8.45);
    assert_eq!(amelie.reception.rating_difference, -0.15);
}

#[test]
fn ascii_escaping_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    let opts = PipelineOptions {
        ascii_only: false,
        ..quiet_options(&out)
    };

    let report = run_pipeline(&opts).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("Le Fabuleux Destin d'Amélie Poulain"));
    assert!(text.contains("Toshirô Mifune"));
    // Structural comparison does not care about escaping.
    assert!(report.matches_reference);
}

#[test]
fn genre_file_source_replaces_reference_genres() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    let opts = PipelineOptions {
        genre_source: GenreSource::GenreFile,
        ..quiet_options(&out)
    };

    let report = run_pipeline(&opts).unwrap();
    assert!(!report.matches_reference);

    let records = read_records(&out);
    let shawshank = records.iter().find(|r| r.id == "tt0111161").unwrap();
    assert_eq!(shawshank.extra_genres, vec!["Prison Drama".to_string()]);
    let amelie = records.iter().find(|r| r.id == "tt0211915").unwrap();
    assert!(amelie.extra_genres.is_empty());
}

#[test]
fn mismatch_with_reference_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.json");
    fs::write(&reference, "[]").unwrap();
    let out = dir.path().join("out.json");
    let opts = PipelineOptions {
        inputs: InputPaths {
            reference: reference.clone(),
            ..fixture_inputs()
        },
        ..quiet_options(&out)
    };

    let report = run_pipeline(&opts).unwrap();
    assert!(!report.matches_reference);
    assert_eq!(report.records_written, 7);
    // No reference entries, so no extra genres anywhere.
    assert!(read_records(&out).iter().all(|r| r.extra_genres.is_empty()));
}

#[test]
fn malformed_reference_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.json");
    fs::write(&reference, "[{\"id\": ").unwrap();
    let out = dir.path().join("out.json");
    let opts = PipelineOptions {
        inputs: InputPaths {
            reference,
            ..fixture_inputs()
        },
        ..quiet_options(&out)
    };

    let err = run_pipeline(&opts).unwrap_err();
    assert!(err.to_string().contains("json decode error"));
    assert!(!out.exists());
}
