//! Row conversion helpers shared by the query modules.

use jiff::Timestamp;
use rusqlite::{types::Type, Row};

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Reads a nullable RFC 3339 timestamp column.
pub(crate) fn optional_timestamp_column(
    row: &Row,
    index: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(index)?
        .map(|value| {
            value.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Reads a JSON text column into a deserializable value.
pub(crate) fn json_column<T: serde::de::DeserializeOwned>(
    row: &Row,
    index: usize,
) -> rusqlite::Result<T> {
    let raw: String = row.get(index)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Maps empty strings to `None` before they reach a nullable column.
pub(crate) fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
