//! Tabular (CSV) movie ingestion.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{EnrichError, EnrichResult};
use crate::types::{Column, MovieRow};

/// Load the movie table from a CSV file.
///
/// Rules:
///
/// - CSV must have headers; columns are matched by name, order can differ.
/// - Unknown columns are ignored. A known column missing from the header leaves that cell absent
///   in every row, which fails rows individually when they are formatted.
/// - Every cell is kept as raw text (`year` included).
/// - Short records leave their trailing cells empty; a record with more cells than the header is
///   a whole-file error.
pub fn load_movies_from_path(path: impl AsRef<Path>) -> EnrichResult<Vec<MovieRow>> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| open_error(path, e))?;
    load_movies_from_reader(&mut rdr)
}

/// Load the movie table from an existing CSV reader.
pub fn load_movies_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> EnrichResult<Vec<MovieRow>> {
    let headers = rdr.headers()?.clone();

    // Map CSV column indexes -> known columns (first occurrence of a header wins).
    let mut columns: Vec<Option<Column>> = Vec::with_capacity(headers.len());
    for header in headers.iter() {
        let column = Column::from_header(header.trim());
        let duplicate = column.is_some() && columns.contains(&column);
        columns.push(if duplicate { None } else { column });
    }

    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based for users, +1 again because the header is line 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        if record.len() > headers.len() {
            return Err(EnrichError::SchemaMismatch {
                message: format!(
                    "row {user_row} has {} fields, header has {}",
                    record.len(),
                    headers.len()
                ),
            });
        }

        let mut row = MovieRow::new();
        for (idx, column) in columns.iter().enumerate() {
            if let Some(column) = column {
                row.set(*column, record.get(idx).unwrap_or(""));
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

fn open_error(path: &Path, err: csv::Error) -> EnrichError {
    if let csv::ErrorKind::Io(io) = err.kind() {
        if io.kind() == ErrorKind::NotFound {
            return EnrichError::NotFound {
                path: path.to_path_buf(),
            };
        }
    }
    EnrichError::Csv(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(input: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input.as_bytes())
    }

    #[test]
    fn quoted_multi_value_cells_stay_whole() {
        let input = "id,cast_id,cast_name\ntt1,\"nm1,nm2\",\"Ada, Grace\"\n";
        let rows = load_movies_from_reader(&mut reader(input)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].raw(Column::CastId), Some("nm1,nm2"));
        assert_eq!(rows[0].raw(Column::CastName), Some("Ada, Grace"));
        assert_eq!(rows[0].raw(Column::Rank), None);
    }

    #[test]
    fn short_record_leaves_trailing_cells_empty() {
        let input = "id,year,imdb_rating\ntt1,1994\n";
        let rows = load_movies_from_reader(&mut reader(input)).unwrap();
        assert_eq!(rows[0].raw(Column::Year), Some("1994"));
        assert_eq!(rows[0].raw(Column::ImdbRating), Some(""));
    }

    #[test]
    fn long_record_is_rejected() {
        let input = "id,year\ntt1,1994,extra\n";
        let err = load_movies_from_reader(&mut reader(input)).unwrap_err();
        assert!(err.to_string().contains("row 2 has 3 fields"));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = load_movies_from_path("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, EnrichError::NotFound { .. }));
    }
}
