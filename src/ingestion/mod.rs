//! Input loading.
//!
//! Most callers should use [`load_inputs`], which loads the movie table and the three JSON
//! documents named by an [`InputPaths`] and reports each outcome to an optional
//! [`PipelineObserver`]. Any failure here is fatal for the run.
//!
//! Format-specific functions live in [`csv`] and [`json`].

pub mod csv;
pub mod json;

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::EnrichResult;
use crate::observability::{emit, InputKind, PipelineEvent, PipelineObserver};
use crate::types::MovieRow;

pub use self::csv::{load_movies_from_path, load_movies_from_reader};
pub use self::json::{
    genre_lookup_from_genre_file, genre_lookup_from_reference, load_json_document,
    valid_writer_ids,
};

/// Locations of the four input documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// Tabular movie data.
    pub movies: PathBuf,
    /// Genre auxiliary document.
    pub genres: PathBuf,
    /// Writer auxiliary document.
    pub writers: PathBuf,
    /// Previously produced output, used for genre lookups and validation.
    pub reference: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            movies: PathBuf::from("movies.csv"),
            genres: PathBuf::from("genre.json"),
            writers: PathBuf::from("writters.json"),
            reference: PathBuf::from("desired_output.json"),
        }
    }
}

/// Everything loaded from disk, before any lookup is derived.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub movies: Vec<MovieRow>,
    pub genres: Value,
    pub writers: Value,
    pub reference: Value,
}

/// Load all inputs in order: movies, genres, writers, reference.
///
/// Stops at the first failure, after reporting it as [`PipelineEvent::InputFailed`].
pub fn load_inputs(
    paths: &InputPaths,
    observer: Option<&dyn PipelineObserver>,
) -> EnrichResult<Inputs> {
    let movies = observe_load(InputKind::Movies, &paths.movies, observer, |p| {
        let rows = load_movies_from_path(p)?;
        let n = rows.len();
        Ok((rows, n))
    })?;
    let genres = observe_load(InputKind::Genres, &paths.genres, observer, load_counted)?;
    let writers = observe_load(InputKind::Writers, &paths.writers, observer, load_counted)?;
    let reference = observe_load(InputKind::Reference, &paths.reference, observer, load_counted)?;

    Ok(Inputs {
        movies,
        genres,
        writers,
        reference,
    })
}

fn load_counted(path: &Path) -> EnrichResult<(Value, usize)> {
    let doc = load_json_document(path)?;
    let n = json::entry_count(&doc);
    Ok((doc, n))
}

fn observe_load<T>(
    kind: InputKind,
    path: &Path,
    observer: Option<&dyn PipelineObserver>,
    load: impl FnOnce(&Path) -> EnrichResult<(T, usize)>,
) -> EnrichResult<T> {
    match load(path) {
        Ok((value, entries)) => {
            emit(
                observer,
                PipelineEvent::InputLoaded {
                    kind,
                    path: path.to_path_buf(),
                    entries,
                },
            );
            Ok(value)
        }
        Err(e) => {
            emit(
                observer,
                PipelineEvent::InputFailed {
                    kind,
                    path: path.to_path_buf(),
                    severity: e.severity(),
                    error: e.to_string(),
                },
            );
            Err(e)
        }
    }
}
