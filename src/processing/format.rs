//! Per-row enrichment: one [`MovieRow`] plus lookups -> one [`OutputRecord`].

use crate::error::EnrichResult;
use crate::observability::ListField;
use crate::types::{
    CastMember, Column, Director, GenreLookup, MovieRow, OutputRecord, Reception,
    ReceptionCategory, ValidWriterIds, Writer, YearlyAverages,
};

use super::rounding::round_to;

/// Differences strictly beyond this distance from the yearly average leave the "Average" band.
pub const AVERAGE_BAND: f64 = 0.5;

/// Read-only lookups shared by every row of a run.
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentContext<'a> {
    pub valid_writer_ids: &'a ValidWriterIds,
    pub genre_lookup: &'a GenreLookup,
    pub yearly_average: &'a YearlyAverages,
}

impl<'a> EnrichmentContext<'a> {
    pub fn new(
        valid_writer_ids: &'a ValidWriterIds,
        genre_lookup: &'a GenreLookup,
        yearly_average: &'a YearlyAverages,
    ) -> Self {
        Self {
            valid_writer_ids,
            genre_lookup,
            yearly_average,
        }
    }
}

/// A formatted record plus the id/name lists that had to be emptied.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedRecord {
    pub record: OutputRecord,
    pub mismatches: Vec<ListField>,
}

/// Classify a rounded rating difference. Exactly ±0.5 is still "Average".
pub fn rating_category(difference: f64) -> ReceptionCategory {
    if difference > AVERAGE_BAND {
        ReceptionCategory::AboveAverage
    } else if difference < -AVERAGE_BAND {
        ReceptionCategory::BelowAverage
    } else {
        ReceptionCategory::Average
    }
}

/// Split two comma-delimited parallel lists into trimmed `(id, name)` pairs.
///
/// Returns `None` when the lists have different lengths.
pub fn split_pairs<'r>(ids: &'r str, names: &'r str) -> Option<Vec<(&'r str, &'r str)>> {
    let ids: Vec<&str> = ids.split(',').map(str::trim).collect();
    let names: Vec<&str> = names.split(',').map(str::trim).collect();
    if ids.len() != names.len() {
        return None;
    }
    Some(ids.into_iter().zip(names).collect())
}

/// Build the output record for one row.
///
/// Fails on the first cell that is missing or cannot be converted; the caller decides whether to
/// skip the row. Mismatched cast/writer lists are not failures: the list is left empty and
/// reported in [`FormattedRecord::mismatches`].
pub fn format_record(row: &MovieRow, ctx: &EnrichmentContext<'_>) -> EnrichResult<FormattedRecord> {
    let year = row.year()?;
    let rating = row.imdb_rating()?;
    let year_average = ctx.yearly_average.get_or_zero(year);
    let difference = round_to(rating - year_average, 2);
    let category = rating_category(difference);

    let mut mismatches = Vec::new();

    let writers = match split_pairs(
        row.required(Column::WritterId)?,
        row.required(Column::WritterName)?,
    ) {
        Some(pairs) => pairs
            .into_iter()
            .map(|(id, name)| Writer {
                id: id.to_string(),
                name: name.to_string(),
                valid: ctx.valid_writer_ids.contains(id),
            })
            .collect(),
        None => {
            mismatches.push(ListField::Writers);
            Vec::new()
        }
    };

    let cast = match split_pairs(
        row.required(Column::CastId)?,
        row.required(Column::CastName)?,
    ) {
        Some(pairs) => pairs
            .into_iter()
            .map(|(id, name)| CastMember {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
        None => {
            mismatches.push(ListField::Cast);
            Vec::new()
        }
    };

    let id = row.id()?;
    let imdb_votes = row.imdb_votes()?;
    let duration = row.duration()?;

    let record = OutputRecord {
        rank: row.rank()?,
        id: id.to_string(),
        name: row.text(Column::Name)?.to_string(),
        year: row.year_number()?,
        imdb_votes,
        imdb_rating: rating,
        certificate: row.text(Column::Certificate)?.to_string(),
        duration,
        genre: row.text(Column::Genre)?.to_string(),
        img_link: row.text(Column::ImgLink)?.to_string(),
        cast,
        director: Director {
            id: row.text(Column::DirectorId)?.to_string(),
            name: row.text(Column::DirectorName)?.to_string(),
        },
        writers,
        extra_genres: ctx.genre_lookup.get(id).to_vec(),
        rating_percentage: round_to(rating * 10.0, 1),
        popularity_score: round_to(rating * imdb_votes as f64 / 1000.0, 2),
        duration_hours: round_to(duration as f64 / 60.0, 2),
        release_date: format!("{year}-01-01"),
        reception: Reception {
            year_average_rating: year_average,
            rating_difference: difference,
            category,
        },
    };

    Ok(FormattedRecord { record, mismatches })
}
