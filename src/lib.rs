//! `movie-enrichment` turns a tabular movie dataset into a normalized, enriched JSON document and
//! checks it against a reference output.
//!
//! The primary entrypoint is [`pipeline::run_pipeline`], which:
//!
//! 1. loads the movie table (CSV) and three JSON documents (genres, writers, reference output)
//! 2. computes the mean rating of every year
//! 3. formats each row into an [`types::OutputRecord`], skipping rows that cannot be converted
//! 4. writes the collection as indented JSON
//! 5. compares it with the reference output and reports match/mismatch
//!
//! ## Output shape
//!
//! Each record carries the row's own fields plus:
//!
//! - `cast` / `writers`: decomposed from comma-delimited parallel id/name lists; a writer is
//!   `valid` when its id appears in the writers document
//! - `extra_genres`: looked up by movie id
//! - `rating_percentage`, `popularity_score`, `duration_hours`, `release_date`
//! - `reception`: the year's average rating, the rounded difference to it, and a category
//!   (`"Above Average"` / `"Average"` / `"Below Average"`, with a ±0.5 band)
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV and JSON loading, lookup construction
//! - [`processing`]: yearly averages, per-row formatting, collection building
//! - [`output`]: JSON writing and reference comparison
//! - [`observability`]: pipeline events and observers
//! - [`pipeline`]: options and the end-to-end run
//! - [`types`]: row, lookup and output types
//! - [`error`]: the error type shared by all of the above

pub mod error;
pub mod ingestion;
pub mod observability;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{EnrichError, EnrichResult};
pub use pipeline::{run_pipeline, GenreSource, PipelineOptions, RunReport};
