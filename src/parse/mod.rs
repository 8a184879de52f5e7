use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::debug;

use crate::error::IngestError;

/// Number of positional columns in the source file:
/// id, room_id, timestamp, temperature, direction.
const COLUMN_COUNT: usize = 5;

/// One row of the source file, bound to canonical column names by position.
/// Discarded after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub id: String,
    pub room_id: String,
    pub timestamp: String,
    pub temperature: f64,
    pub direction: String,
}

/// Read the source file into typed records, in source order.
///
/// The first line is treated as a header and skipped regardless of its text;
/// columns are mapped positionally, never matched by name. Fails with
/// `SourceUnavailable` if the file cannot be opened and `SchemaMismatch` on
/// the first row whose width or temperature value does not fit the schema.
pub fn parse(path: &Path) -> Result<Vec<RawRecord>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        // line numbers are 1-based; line 1 is the header
        let line_no = idx + 1;
        if line_no == 1 {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        records.push(parse_row(&line, line_no)?);
    }

    debug!(rows = records.len(), "parsed source file");
    Ok(records)
}

fn parse_row(line: &str, line_no: usize) -> Result<RawRecord, IngestError> {
    let fields: [String; COLUMN_COUNT] = match split_row(line).try_into() {
        Ok(fields) => fields,
        Err(fields) => {
            return Err(IngestError::SchemaMismatch {
                line: line_no,
                reason: format!("expected {} columns, found {}", COLUMN_COUNT, fields.len()),
            })
        }
    };
    let [id, room_id, timestamp, temperature, direction] = fields;

    let temperature: f64 = temperature.parse().map_err(|_| IngestError::SchemaMismatch {
        line: line_no,
        reason: format!("temperature `{}` is not a number", temperature),
    })?;

    Ok(RawRecord {
        id,
        room_id,
        timestamp,
        temperature,
        direction,
    })
}

/// Split a row on commas, honoring double-quoted fields, and clean each cell.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(COLUMN_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                fields.push(clean_str(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(clean_str(&current));
    fields
}

/// Trim whitespace + strip outer quotes if present.
fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}
