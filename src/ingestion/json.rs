//! JSON document ingestion and lookup construction.
//!
//! Documents are loaded as generic [`serde_json::Value`]s; the lookup builders then check the
//! shape they need:
//!
//! - writers file: an array of id strings, or an object keyed by id
//! - reference output: an array of records carrying `id` and `extra_genres`
//! - genre file: the same array shape, or an object mapping id -> genres

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::{EnrichError, EnrichResult};
use crate::types::{GenreLookup, ValidWriterIds};

/// Load and parse a JSON file.
///
/// A missing file is [`EnrichError::NotFound`]; unparsable content is [`EnrichError::Json`]
/// carrying the path.
pub fn load_json_document(path: impl AsRef<Path>) -> EnrichResult<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EnrichError::NotFound {
            path: path.to_path_buf(),
        },
        _ => EnrichError::Io(e),
    })?;
    serde_json::from_str(&text).map_err(|source| EnrichError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Number of top-level entries in a document (array items or object keys).
pub fn entry_count(doc: &Value) -> usize {
    match doc {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Null => 0,
        _ => 1,
    }
}

/// Build the set of valid writer ids.
///
/// An array contributes its string elements (other elements can never match an id and are
/// skipped); an object contributes its keys.
pub fn valid_writer_ids(doc: &Value) -> EnrichResult<ValidWriterIds> {
    match doc {
        Value::Array(items) => Ok(items.iter().filter_map(Value::as_str).collect()),
        Value::Object(map) => Ok(map.keys().map(String::as_str).collect()),
        other => Err(EnrichError::SchemaMismatch {
            message: format!(
                "writers document must be an array or an object, got {}",
                type_name(other)
            ),
        }),
    }
}

/// Build the genre lookup from the reference output document.
///
/// Every entry must be an object with a string `id` and an array of strings `extra_genres`.
pub fn genre_lookup_from_reference(doc: &Value) -> EnrichResult<GenreLookup> {
    let items = doc.as_array().ok_or_else(|| EnrichError::SchemaMismatch {
        message: format!(
            "reference document must be an array, got {}",
            type_name(doc)
        ),
    })?;

    let mut lookup = GenreLookup::new();
    for (idx0, item) in items.iter().enumerate() {
        let entry = idx0 + 1;
        let obj = item.as_object().ok_or_else(|| EnrichError::SchemaMismatch {
            message: format!("reference entry {entry} is not a json object"),
        })?;
        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| EnrichError::SchemaMismatch {
                message: format!("reference entry {entry} missing string field 'id'"),
            })?;
        let genres = obj
            .get("extra_genres")
            .ok_or_else(|| EnrichError::SchemaMismatch {
                message: format!("reference entry {entry} missing field 'extra_genres'"),
            })?;
        lookup.insert(id, string_list(genres, id)?);
    }
    Ok(lookup)
}

/// Build the genre lookup from the dedicated genre file.
///
/// Accepts the reference-style array of `{ "id", "extra_genres" }` objects, or an object mapping
/// id -> array of genres.
pub fn genre_lookup_from_genre_file(doc: &Value) -> EnrichResult<GenreLookup> {
    match doc {
        Value::Array(_) => genre_lookup_from_reference(doc),
        Value::Object(map) => {
            let mut lookup = GenreLookup::new();
            for (id, genres) in map {
                lookup.insert(id.as_str(), string_list(genres, id)?);
            }
            Ok(lookup)
        }
        other => Err(EnrichError::SchemaMismatch {
            message: format!(
                "genre document must be an array or an object, got {}",
                type_name(other)
            ),
        }),
    }
}

fn string_list(v: &Value, id: &str) -> EnrichResult<Vec<String>> {
    let items = v.as_array().ok_or_else(|| EnrichError::SchemaMismatch {
        message: format!("extra_genres for '{id}' must be an array"),
    })?;
    items
        .iter()
        .map(|g| {
            g.as_str()
                .map(str::to_string)
                .ok_or_else(|| EnrichError::SchemaMismatch {
                    message: format!("extra_genres for '{id}' contains a non-string value: {g}"),
                })
        })
        .collect()
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
