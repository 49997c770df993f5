//! Core data model types.
//!
//! Input rows are held as raw text cells ([`MovieRow`]) and converted through typed accessors, so a
//! bad cell fails only the row that carries it. The lookup tables ([`GenreLookup`],
//! [`ValidWriterIds`], [`YearlyAverages`]) are built once and read-only afterward. The enriched
//! output shape is [`OutputRecord`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EnrichError, EnrichResult};

/// A named column of the tabular movie input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Rank,
    Id,
    Name,
    Year,
    ImdbVotes,
    ImdbRating,
    Certificate,
    Duration,
    Genre,
    ImgLink,
    CastId,
    CastName,
    DirectorId,
    DirectorName,
    WritterId,
    WritterName,
}

impl Column {
    /// Every column, in the order of the canonical header.
    pub const ALL: [Column; 16] = [
        Column::Rank,
        Column::Id,
        Column::Name,
        Column::Year,
        Column::ImdbVotes,
        Column::ImdbRating,
        Column::Certificate,
        Column::Duration,
        Column::Genre,
        Column::ImgLink,
        Column::CastId,
        Column::CastName,
        Column::DirectorId,
        Column::DirectorName,
        Column::WritterId,
        Column::WritterName,
    ];

    /// Header name of the column. `writter_*` is spelled as it appears in the source data.
    pub fn name(self) -> &'static str {
        match self {
            Column::Rank => "rank",
            Column::Id => "id",
            Column::Name => "name",
            Column::Year => "year",
            Column::ImdbVotes => "imdb_votes",
            Column::ImdbRating => "imdb_rating",
            Column::Certificate => "certificate",
            Column::Duration => "duration",
            Column::Genre => "genre",
            Column::ImgLink => "img_link",
            Column::CastId => "cast_id",
            Column::CastName => "cast_name",
            Column::DirectorId => "director_id",
            Column::DirectorName => "director_name",
            Column::WritterId => "writter_id",
            Column::WritterName => "writter_name",
        }
    }

    /// Resolve a header name to a column (exact match).
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == header)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One record of the tabular input, kept as raw text.
///
/// A cell is `None` when its column was absent from the header. Accessors convert on demand and
/// return [`EnrichError::MissingField`] / [`EnrichError::ParseError`] on bad cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRow {
    cells: [Option<String>; 16],
}

impl MovieRow {
    /// Create an empty row (every column absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful in tests.
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Set the raw text of a cell.
    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.cells[column.index()] = Some(value.into());
    }

    /// Raw cell text, or `None` if the column was absent.
    pub fn raw(&self, column: Column) -> Option<&str> {
        self.cells[column.index()].as_deref()
    }

    /// Cell text as-is; empty text is allowed, an absent column is not.
    pub fn text(&self, column: Column) -> EnrichResult<&str> {
        self.raw(column).ok_or_else(|| missing(column))
    }

    /// Cell text that must contain something other than whitespace.
    pub fn required(&self, column: Column) -> EnrichResult<&str> {
        match self.raw(column) {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(missing(column)),
        }
    }

    /// Integer cell. A zero fractional part (`"142.0"`) is accepted.
    pub fn integer(&self, column: Column) -> EnrichResult<i64> {
        let raw = self.required(column)?;
        parse_integer(raw).ok_or_else(|| EnrichError::ParseError {
            column: column.name().to_string(),
            raw: raw.to_string(),
            message: "expected integer".to_string(),
        })
    }

    /// Finite floating point cell.
    pub fn float(&self, column: Column) -> EnrichResult<f64> {
        let raw = self.required(column)?;
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(EnrichError::ParseError {
                column: column.name().to_string(),
                raw: raw.to_string(),
                message: "expected finite number".to_string(),
            }),
            Err(e) => Err(EnrichError::ParseError {
                column: column.name().to_string(),
                raw: raw.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Movie identifier; empty text is accepted.
    pub fn id(&self) -> EnrichResult<&str> {
        self.text(Column::Id)
    }

    /// Identifier used in log lines; never fails.
    pub fn display_id(&self) -> &str {
        self.raw(Column::Id).unwrap_or("<missing id>")
    }

    /// Position in the ranking.
    pub fn rank(&self) -> EnrichResult<i64> {
        self.integer(Column::Rank)
    }

    /// Year exactly as it appears in the input; used as the yearly-average key.
    pub fn year(&self) -> EnrichResult<&str> {
        self.required(Column::Year)
    }

    /// Year as a number. Unlike other integer cells, a fractional form is rejected.
    pub fn year_number(&self) -> EnrichResult<i64> {
        let raw = self.year()?;
        raw.trim()
            .parse::<i64>()
            .map_err(|e| EnrichError::ParseError {
                column: Column::Year.name().to_string(),
                raw: raw.to_string(),
                message: e.to_string(),
            })
    }

    /// Number of votes behind the rating.
    pub fn imdb_votes(&self) -> EnrichResult<i64> {
        self.integer(Column::ImdbVotes)
    }

    /// Rating as a finite float.
    pub fn imdb_rating(&self) -> EnrichResult<f64> {
        self.float(Column::ImdbRating)
    }

    /// Runtime in minutes.
    pub fn duration(&self) -> EnrichResult<i64> {
        self.integer(Column::Duration)
    }
}

fn missing(column: Column) -> EnrichError {
    EnrichError::MissingField {
        column: column.name().to_string(),
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    // Float-typed integer columns surface as "142.0".
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Movie id → supplementary genre tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreLookup {
    by_id: HashMap<String, Vec<String>>,
}

impl GenreLookup {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the genres of a movie. Later entries win, like a dict comprehension.
    pub fn insert(&mut self, id: impl Into<String>, genres: Vec<String>) {
        self.by_id.insert(id.into(), genres);
    }

    /// Genres for `id`; an unknown id yields an empty slice.
    pub fn get(&self, id: &str) -> &[String] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of movies with an entry.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no movie has an entry.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for GenreLookup {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for (id, genres) in iter {
            lookup.insert(id, genres);
        }
        lookup
    }
}

/// Writer identifiers recognized as valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidWriterIds {
    ids: HashSet<String>,
}

impl ValidWriterIds {
    /// Create an empty id set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is a known writer.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ValidWriterIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Year (raw text) → mean rating rounded to two decimals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyAverages {
    by_year: BTreeMap<String, f64>,
}

impl YearlyAverages {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the average of `year`.
    pub fn insert(&mut self, year: impl Into<String>, average: f64) {
        self.by_year.insert(year.into(), average);
    }

    /// Average for `year`, if any row of that year had a usable rating.
    pub fn get(&self, year: &str) -> Option<f64> {
        self.by_year.get(year).copied()
    }

    /// Average for `year`, or `0.0` when the year has no entry.
    pub fn get_or_zero(&self, year: &str) -> f64 {
        self.get(year).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}

/// A cast member of an [`OutputRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: String,
    pub name: String,
}

/// The director of an [`OutputRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Director {
    pub id: String,
    pub name: String,
}

/// A writer of an [`OutputRecord`], flagged against [`ValidWriterIds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Writer {
    pub id: String,
    pub name: String,
    pub valid: bool,
}

/// How a movie's rating compares to the average of its release year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceptionCategory {
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl fmt::Display for ReceptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReceptionCategory::AboveAverage => "Above Average",
            ReceptionCategory::Average => "Average",
            ReceptionCategory::BelowAverage => "Below Average",
        })
    }
}

/// Year-relative reception block of an [`OutputRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reception {
    pub year_average_rating: f64,
    pub rating_difference: f64,
    pub category: ReceptionCategory,
}

/// The enriched representation of one [`MovieRow`].
///
/// Field order is the serialized order. `imdb_votes` serializes as `imbd_votes` to stay
/// compatible with existing reference documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub rank: i64,
    pub id: String,
    pub name: String,
    pub year: i64,
    #[serde(rename = "imbd_votes")]
    pub imdb_votes: i64,
    pub imdb_rating: f64,
    pub certificate: String,
    pub duration: i64,
    pub genre: String,
    pub img_link: String,
    pub cast: Vec<CastMember>,
    pub director: Director,
    pub writers: Vec<Writer>,
    pub extra_genres: Vec<String>,
    pub rating_percentage: f64,
    pub popularity_score: f64,
    pub duration_hours: f64,
    pub release_date: String,
    pub reception: Reception,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_round_trip_through_header_lookup() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.name()), Some(column));
        }
        assert_eq!(Column::from_header("writer_id"), None);
    }

    #[test]
    fn integer_accepts_zero_fraction_but_not_other_fractions() {
        let row = MovieRow::new()
            .with(Column::Rank, "7.0")
            .with(Column::Duration, "7.5");
        assert_eq!(row.rank().unwrap(), 7);
        let err = row.duration().unwrap_err();
        assert!(err.to_string().contains("column 'duration'"));
    }

    #[test]
    fn year_keeps_raw_text_and_rejects_fractional_number() {
        let row = MovieRow::new().with(Column::Year, "1994.0");
        assert_eq!(row.year().unwrap(), "1994.0");
        assert!(row.year_number().is_err());
    }

    #[test]
    fn absent_and_blank_cells_are_missing_fields() {
        let row = MovieRow::new().with(Column::ImdbRating, "  ");
        assert!(matches!(
            row.imdb_rating(),
            Err(EnrichError::MissingField { ref column }) if column == "imdb_rating"
        ));
        assert!(matches!(
            row.imdb_votes(),
            Err(EnrichError::MissingField { ref column }) if column == "imdb_votes"
        ));
        assert_eq!(row.display_id(), "<missing id>");
    }

    #[test]
    fn free_text_may_be_empty() {
        let row = MovieRow::new().with(Column::Certificate, "");
        assert_eq!(row.text(Column::Certificate).unwrap(), "");
    }

    #[test]
    fn float_rejects_non_finite_values() {
        let row = MovieRow::new().with(Column::ImdbRating, "NaN");
        assert!(matches!(row.imdb_rating(), Err(EnrichError::ParseError { .. })));
    }

    #[test]
    fn genre_lookup_defaults_to_empty() {
        let lookup: GenreLookup = vec![("tt1".to_string(), vec!["Drama".to_string()])]
            .into_iter()
            .collect();
        assert_eq!(lookup.get("tt1"), ["Drama".to_string()]);
        assert!(lookup.get("tt2").is_empty());
    }

    #[test]
    fn reception_category_serializes_with_spaces() {
        let json = serde_json::to_string(&ReceptionCategory::AboveAverage).unwrap();
        assert_eq!(json, "\"Above Average\"");
        assert_eq!(ReceptionCategory::BelowAverage.to_string(), "Below Average");
    }
}
