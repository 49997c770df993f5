//! In-memory enrichment.
//!
//! The processing layer operates on the [`crate::types::MovieRow`]s produced by ingestion:
//!
//! - [`yearly_average()`]: mean rating per year
//! - [`format_record()`]: one row -> one [`crate::types::OutputRecord`]
//! - [`build_all()`]: every row, with per-row failure isolation
//!
//! ## Example
//!
//! ```rust
//! use movie_enrichment::processing::{build_all, yearly_average, EnrichmentContext};
//! use movie_enrichment::types::{Column, GenreLookup, MovieRow, ValidWriterIds};
//!
//! let row = MovieRow::new()
//!     .with(Column::Rank, "1")
//!     .with(Column::Id, "tt0068646")
//!     .with(Column::Name, "The Godfather")
//!     .with(Column::Year, "1972")
//!     .with(Column::ImdbVotes, "1800000")
//!     .with(Column::ImdbRating, "9.2")
//!     .with(Column::Certificate, "R")
//!     .with(Column::Duration, "175")
//!     .with(Column::Genre, "Crime,Drama")
//!     .with(Column::ImgLink, "https://example.org/godfather.jpg")
//!     .with(Column::CastId, "nm0000008,nm0000199")
//!     .with(Column::CastName, "Marlon Brando,Al Pacino")
//!     .with(Column::DirectorId, "nm0000338")
//!     .with(Column::DirectorName, "Francis Ford Coppola")
//!     .with(Column::WritterId, "nm0701374,nm0000338")
//!     .with(Column::WritterName, "Mario Puzo,Francis Ford Coppola");
//! let rows = vec![row];
//!
//! let years = yearly_average(&rows);
//! let writers: ValidWriterIds = ["nm0701374"].into_iter().collect();
//! let genres = GenreLookup::new();
//! let ctx = EnrichmentContext::new(&writers, &genres, &years);
//!
//! let outcome = build_all(&rows, &ctx, None);
//! let godfather = &outcome.records[0];
//! assert_eq!(godfather.reception.year_average_rating, 9.2);
//! assert_eq!(godfather.duration_hours, 2.92);
//! assert!(godfather.writers[0].valid);
//! assert!(!godfather.writers[1].valid);
//! ```

pub mod build;
pub mod format;
pub mod rounding;
pub mod stats;

pub use build::{build_all, BuildOutcome, SkippedRow};
pub use format::{format_record, rating_category, split_pairs, EnrichmentContext, FormattedRecord};
pub use rounding::{round_scaled, round_to};
pub use stats::yearly_average;
