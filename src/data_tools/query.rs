//! Filter/query engine over a loaded table
//!
//! Filters are ANDed. Equality compares the row value case-insensitively as
//! a string, so `007` and `7` are different values; numeric comparison is
//! opt-in through `{"number": ..}`. Row order is the file order.

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::errors::{DataError, Result};
use super::record::{scalar_to_string, Record, Table};
use super::source_reader::DataStore;

/// Predicate on a single column
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Case-insensitive equality
    Equals(String),
    /// Equality against any member
    AnyOf(Vec<String>),
    /// Case-insensitive substring
    Contains(String),
    /// Cell parses as a number equal to this one
    Number(f64),
}

impl FilterValue {
    /// Decode a filter value from a tool argument
    ///
    /// Scalars mean equality, arrays mean "any of", `{"contains": "..."}`
    /// means substring and `{"number": 5}` numeric equality. Anything else
    /// is rejected.
    pub fn from_json(column: &str, value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::String(_) | JsonValue::Number(_) | JsonValue::Bool(_) => {
                Ok(FilterValue::Equals(scalar_to_string(value)))
            }
            JsonValue::Array(items) => {
                let mut members = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        JsonValue::Array(_) | JsonValue::Object(_) | JsonValue::Null => {
                            return Err(DataError::InvalidFilter {
                                column: column.to_string(),
                                reason: "list members must be scalars".to_string(),
                            })
                        }
                        scalar => members.push(scalar_to_string(scalar)),
                    }
                }
                Ok(FilterValue::AnyOf(members))
            }
            JsonValue::Object(map) => {
                let entry = if map.len() == 1 { map.iter().next() } else { None };
                match entry {
                    Some((key, JsonValue::String(needle))) if key == "contains" => {
                        Ok(FilterValue::Contains(needle.clone()))
                    }
                    Some((key, JsonValue::Number(n))) if key == "number" => n
                        .as_f64()
                        .map(FilterValue::Number)
                        .ok_or_else(|| DataError::InvalidFilter {
                            column: column.to_string(),
                            reason: format!("{} is not representable as a number", n),
                        }),
                    _ => Err(DataError::InvalidFilter {
                        column: column.to_string(),
                        reason: "object filters must be {\"contains\": \"<text>\"} or {\"number\": <n>}"
                            .to_string(),
                    }),
                }
            }
            JsonValue::Null => Err(DataError::InvalidFilter {
                column: column.to_string(),
                reason: "null is not a filter value".to_string(),
            }),
        }
    }

    /// Test a raw cell value
    pub fn matches(&self, cell: &str) -> bool {
        match self {
            FilterValue::Equals(expected) => values_equal(cell, expected),
            FilterValue::AnyOf(options) => options.iter().any(|o| values_equal(cell, o)),
            FilterValue::Contains(needle) => cell
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            FilterValue::Number(expected) => cell.parse::<f64>().is_ok_and(|v| v == *expected),
        }
    }
}

fn values_equal(cell: &str, expected: &str) -> bool {
    cell.to_lowercase() == expected.to_lowercase()
}

/// Ordered set of column filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    entries: Vec<(String, FilterValue)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single equality filter
    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().with(column, FilterValue::Equals(value.into()))
    }

    /// Add a filter
    pub fn with(mut self, column: impl Into<String>, value: FilterValue) -> Self {
        self.entries.push((column.into(), value));
        self
    }

    /// Decode a `{column: value}` JSON object; null or absent means no filters
    pub fn from_json(value: Option<&JsonValue>) -> Result<Self> {
        match value {
            None | Some(JsonValue::Null) => Ok(Self::new()),
            Some(JsonValue::Object(map)) => {
                let mut filters = Self::new();
                for (column, v) in map {
                    filters = filters.with(column.clone(), FilterValue::from_json(column, v)?);
                }
                Ok(filters)
            }
            Some(_) => Err(DataError::InvalidFilter {
                column: String::new(),
                reason: "filters must be an object of column/value pairs".to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Whether every filter matches the record
    pub fn matches(&self, record: &Record) -> bool {
        self.entries
            .iter()
            .all(|(column, filter)| record.get(column).is_some_and(|cell| filter.matches(cell)))
    }
}

/// Filter a table, then truncate to `limit`
///
/// Every filter column must exist in the table; an unknown column is an
/// argument error listing what is available.
pub fn query(table: &Table, filters: &Filters, limit: Option<usize>) -> Result<Vec<Record>> {
    for (column, _) in filters.iter() {
        if !table.has_column(column) {
            return Err(DataError::UnknownColumn {
                column: column.to_string(),
                table: table.file_name(),
                available: table.columns.clone(),
            });
        }
    }

    let matching = table.rows.iter().filter(|row| filters.matches(row));
    let rows = match limit {
        Some(n) => matching.take(n).cloned().collect(),
        None => matching.cloned().collect(),
    };
    Ok(rows)
}

/// Query result as returned to the host
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub source_file: String,
    pub total_records: usize,
    pub columns: Vec<String>,
    pub results: Vec<Record>,
}

impl DataStore {
    /// Load a source by name and run [`query`] over it
    pub fn query_source(
        &self,
        name: &str,
        filters: &Filters,
        limit: Option<usize>,
    ) -> Result<QueryResult> {
        let table = self.load(name)?;
        let results = query(&table, filters, limit)?;
        Ok(QueryResult {
            source_file: table.path.display().to_string(),
            total_records: results.len(),
            columns: table.columns,
            results,
        })
    }
}
