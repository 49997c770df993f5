//! End-to-end run: load, compute, build, write, compare.
//!
//! ```no_run
//! use movie_enrichment::pipeline::{run_pipeline, PipelineOptions};
//!
//! # fn main() -> Result<(), movie_enrichment::EnrichError> {
//! // Reads movies.csv, genre.json, writters.json and desired_output.json from the
//! // working directory and writes output_refined.json.
//! let report = run_pipeline(&PipelineOptions::default())?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::EnrichResult;
use crate::ingestion::{self, InputPaths};
use crate::observability::{emit, LogObserver, PipelineEvent, PipelineObserver};
use crate::output::{compare_to_reference, write_json};
use crate::processing::{build_all, yearly_average, EnrichmentContext};
use crate::types::GenreLookup;

/// Where `extra_genres` are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreSource {
    /// Use the `id`/`extra_genres` pairs of the reference output document.
    #[default]
    ReferenceOutput,
    /// Use the genre auxiliary document.
    GenreFile,
}

impl FromStr for GenreSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" | "reference-output" => Ok(Self::ReferenceOutput),
            "genre" | "genre-file" => Ok(Self::GenreFile),
            other => Err(format!(
                "unknown genre source '{other}' (expected 'reference' or 'genre-file')"
            )),
        }
    }
}

/// Options controlling a pipeline run.
///
/// Use [`Default`] for the conventional file names in the working directory.
#[derive(Clone)]
pub struct PipelineOptions {
    pub inputs: InputPaths,
    /// Output document; overwritten if present.
    pub output_path: PathBuf,
    pub genre_source: GenreSource,
    /// Escape non-ASCII characters in the output document.
    pub ascii_only: bool,
    /// Receives every pipeline event. `None` silences reporting entirely.
    pub observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("inputs", &self.inputs)
            .field("output_path", &self.output_path)
            .field("genre_source", &self.genre_source)
            .field("ascii_only", &self.ascii_only)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            inputs: InputPaths::default(),
            output_path: PathBuf::from("output_refined.json"),
            genre_source: GenreSource::default(),
            ascii_only: true,
            observer: Some(Arc::new(LogObserver::default())),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub rows_read: usize,
    pub records_written: usize,
    pub rows_skipped: usize,
    pub list_mismatches: usize,
    pub matches_reference: bool,
    pub output_path: PathBuf,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows_read={}, records_written={}, rows_skipped={}, list_mismatches={}, matches_reference={}, output={}",
            self.rows_read,
            self.records_written,
            self.rows_skipped,
            self.list_mismatches,
            self.matches_reference,
            self.output_path.display()
        )
    }
}

/// Run the whole pipeline.
///
/// Fails only on whole-run errors: an input that is missing or malformed, a lookup document of
/// the wrong shape, or an output that cannot be written. Rows that cannot be formatted are
/// skipped, and a mismatch with the reference is reported in [`RunReport::matches_reference`].
pub fn run_pipeline(options: &PipelineOptions) -> EnrichResult<RunReport> {
    let observer = options.observer.as_deref();

    let inputs = ingestion::load_inputs(&options.inputs, observer)?;

    let genre_lookup: GenreLookup = match options.genre_source {
        GenreSource::ReferenceOutput => ingestion::genre_lookup_from_reference(&inputs.reference)?,
        GenreSource::GenreFile => ingestion::genre_lookup_from_genre_file(&inputs.genres)?,
    };
    let valid_writer_ids = ingestion::valid_writer_ids(&inputs.writers)?;
    let yearly = yearly_average(&inputs.movies);

    let ctx = EnrichmentContext::new(&valid_writer_ids, &genre_lookup, &yearly);
    let outcome = build_all(&inputs.movies, &ctx, observer);

    write_json(&outcome.records, &options.output_path, options.ascii_only)?;
    emit(
        observer,
        PipelineEvent::OutputWritten {
            path: options.output_path.clone(),
            records: outcome.records.len(),
        },
    );

    let matches_reference = compare_to_reference(&outcome.records, &inputs.reference, observer);

    Ok(RunReport {
        rows_read: inputs.movies.len(),
        records_written: outcome.records.len(),
        rows_skipped: outcome.skipped.len(),
        list_mismatches: outcome.list_mismatches,
        matches_reference,
        output_path: options.output_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_source_parses_aliases() {
        assert_eq!("reference".parse::<GenreSource>(), Ok(GenreSource::ReferenceOutput));
        assert_eq!("Genre-File".parse::<GenreSource>(), Ok(GenreSource::GenreFile));
        assert!("tmdb".parse::<GenreSource>().is_err());
    }

    #[test]
    fn default_options_use_conventional_file_names() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.inputs.movies, PathBuf::from("movies.csv"));
        assert_eq!(opts.inputs.writers, PathBuf::from("writters.json"));
        assert_eq!(opts.output_path, PathBuf::from("output_refined.json"));
        assert_eq!(opts.genre_source, GenreSource::ReferenceOutput);
        assert!(opts.ascii_only);
        assert!(opts.observer.is_some());
    }
}
