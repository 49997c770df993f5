//! JSON serialization of the output collection.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{EnrichError, EnrichResult};
use crate::types::OutputRecord;

/// Render records as a 2-space indented JSON array, without a trailing newline.
///
/// With `ascii_only`, every non-ASCII character and DEL (U+007F) is written as a `\uXXXX` escape
/// (a surrogate pair above the BMP), which keeps the output byte-compatible with reference
/// documents produced that way.
pub fn to_json_string(records: &[OutputRecord], ascii_only: bool) -> EnrichResult<String> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"  "));
    records.serialize(&mut ser).map_err(EnrichError::Serialize)?;
    let text = String::from_utf8(buf)
        .map_err(|e| EnrichError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    Ok(if ascii_only {
        escape_non_ascii(&text)
    } else {
        text
    })
}

/// Write records to `path`, replacing any existing file.
pub fn write_json(
    records: &[OutputRecord],
    path: impl AsRef<Path>,
    ascii_only: bool,
) -> EnrichResult<()> {
    let text = to_json_string(records, ascii_only)?;
    fs::write(path, text)?;
    Ok(())
}

/// Escape non-ASCII characters and DEL in serialized JSON.
///
/// Only string contents can hold non-ASCII characters in serializer output, so escaping every
/// occurrence keeps the document valid.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() && c != '\u{7f}' {
            out.push(c);
            continue;
        }
        for unit in c.encode_utf16(&mut units) {
            let _ = write!(out, "\\u{unit:04x}");
        }
    }
    out
}
