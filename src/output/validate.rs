//! Validation of the output collection against a reference document.

use serde_json::Value;

use crate::observability::{emit, PipelineEvent, PipelineObserver};
use crate::types::OutputRecord;

/// Deep, type-sensitive equality between `records` and `reference`.
///
/// Integers never equal floats (`9` vs `9.0`), object key order is irrelevant, array order is
/// significant. Reports [`PipelineEvent::ReferenceCompared`] and returns the outcome; a collection
/// that cannot be converted to JSON simply does not match.
pub fn compare_to_reference(
    records: &[OutputRecord],
    reference: &Value,
    observer: Option<&dyn PipelineObserver>,
) -> bool {
    let matches = match serde_json::to_value(records) {
        Ok(generated) => generated == *reference,
        Err(_) => false,
    };
    emit(observer, PipelineEvent::ReferenceCompared { matches });
    matches
}
