//! Collection building: format every row, keep the successes in input order.

use crate::error::EnrichError;
use crate::observability::{emit, PipelineEvent, PipelineObserver};
use crate::types::{MovieRow, OutputRecord};

use super::format::{format_record, EnrichmentContext};

/// A row that could not be formatted.
#[derive(Debug)]
pub struct SkippedRow {
    /// Id of the row (or a placeholder if the id cell was absent).
    pub movie_id: String,
    /// 0-based position of the row in the input.
    pub index: usize,
    pub error: EnrichError,
}

/// Result of [`build_all`].
#[derive(Debug, Default)]
pub struct BuildOutcome {
    /// Formatted records, in input order.
    pub records: Vec<OutputRecord>,
    /// Rows that were dropped, in input order.
    pub skipped: Vec<SkippedRow>,
    /// Number of cast/writer lists emptied because of an id/name length mismatch.
    pub list_mismatches: usize,
}

/// Format every row in order.
///
/// A row that fails is reported as [`PipelineEvent::RowSkipped`] and omitted; the rest of the
/// rows are still processed. Emptied cast/writer lists are reported as
/// [`PipelineEvent::ListMismatch`].
pub fn build_all(
    rows: &[MovieRow],
    ctx: &EnrichmentContext<'_>,
    observer: Option<&dyn PipelineObserver>,
) -> BuildOutcome {
    let mut outcome = BuildOutcome {
        records: Vec::with_capacity(rows.len()),
        ..Default::default()
    };

    for (index, row) in rows.iter().enumerate() {
        match format_record(row, ctx) {
            Ok(formatted) => {
                for field in formatted.mismatches {
                    outcome.list_mismatches += 1;
                    emit(
                        observer,
                        PipelineEvent::ListMismatch {
                            movie_id: row.display_id().to_string(),
                            field,
                        },
                    );
                }
                outcome.records.push(formatted.record);
            }
            Err(error) => {
                emit(
                    observer,
                    PipelineEvent::RowSkipped {
                        movie_id: row.display_id().to_string(),
                        error: error.to_string(),
                    },
                );
                outcome.skipped.push(SkippedRow {
                    movie_id: row.display_id().to_string(),
                    index,
                    error,
                });
            }
        }
    }

    outcome
}
