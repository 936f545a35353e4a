//! Cross-source timeline for one identifier

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::{DataError, Result};
use super::query::{query, Filters};
use super::record::{is_timestamp_column, parse_timestamp, Record};
use super::source_reader::DataStore;

/// Identifier column used when the caller does not name one
pub const DEFAULT_ID_COLUMN: &str = "shipment_id";

pub const OWNER_UNKNOWN: &str = "Unknown";
pub const OWNER_QA: &str = "QA_Team";

fn unknown_owner() -> String {
    OWNER_UNKNOWN.to_string()
}

/// A matching row tagged with where it came from and when it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Source table name
    pub source: String,
    /// Raw timestamp value as found in the row
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Column the timestamp was taken from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_column: Option<String>,
    /// Parsed timestamp used for ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<NaiveDateTime>,
    #[serde(default = "unknown_owner")]
    pub owner: String,
    #[serde(default)]
    pub data: Record,
}

impl TimelineEvent {
    /// Tag a row from `source`, resolving its timestamp and owner
    pub fn from_record(source: impl Into<String>, record: Record) -> Self {
        let found = record.iter().find_map(|(column, value)| {
            if !is_timestamp_column(column) {
                return None;
            }
            parse_timestamp(value).map(|at| (column.to_string(), value.to_string(), at))
        });
        let (timestamp_column, timestamp, resolved_at) = match found {
            Some((column, raw, at)) => (Some(column), Some(raw), Some(at)),
            None => (None, None, None),
        };

        Self {
            source: source.into(),
            timestamp,
            timestamp_column,
            resolved_at,
            owner: infer_owner(&record),
            data: record,
        }
    }
}

/// Responsible party heuristic
///
/// A supplier column names a carrier; a QA decision or a quarantined status
/// belongs to QA.
pub fn infer_owner(record: &Record) -> String {
    if let Some(supplier) = record.get("supplier_id") {
        return format!("Carrier_{}", supplier);
    }
    if record.has_column("decision") {
        return OWNER_QA.to_string();
    }
    if record.get("status") == Some("Quarantined") {
        return OWNER_QA.to_string();
    }
    unknown_owner()
}

/// Collect every row mentioning `id` across all sources, oldest first
///
/// Tables without `id_column` contribute nothing. Rows with no usable
/// timestamp keep their discovery order after all timestamped rows.
pub fn build_timeline(store: &DataStore, id: &str, id_column: &str) -> Result<Vec<TimelineEvent>> {
    let tables = store.load_all()?;
    if tables.is_empty() {
        return Err(DataError::EmptyStore(store.root().display().to_string()));
    }

    let filters = Filters::equals(id_column, id);
    let mut events = Vec::new();
    for table in tables.iter().filter(|t| t.has_column(id_column)) {
        let rows = query(table, &filters, None)?;
        debug!("{}: {} rows for {} = {}", table.name, rows.len(), id_column, id);
        events.extend(
            rows.into_iter()
                .map(|row| TimelineEvent::from_record(table.name.clone(), row)),
        );
    }

    sort_events(&mut events);
    Ok(events)
}

/// Stable ascending sort, untimed events last
pub fn sort_events(events: &mut [TimelineEvent]) {
    events.sort_by(|a, b| match (a.resolved_at, b.resolved_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Share of timeline events attributed to one owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnerShare {
    pub contribution_pct: f64,
    pub event_count: usize,
}

pub type Accountability = BTreeMap<String, OwnerShare>;

/// Per-owner event counts and percentages (one decimal)
pub fn compute_accountability(events: &[TimelineEvent]) -> Accountability {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for event in events {
        *counts.entry(event.owner.clone()).or_default() += 1;
    }

    let total = events.len();
    counts
        .into_iter()
        .map(|(owner, count)| {
            let pct = (count as f64 / total as f64 * 1000.0).round() / 10.0;
            (
                owner,
                OwnerShare {
                    contribution_pct: pct,
                    event_count: count,
                },
            )
        })
        .collect()
}

/// Timeline plus its accountability breakdown, as returned by the tool
#[derive(Debug, Clone, Serialize)]
pub struct TimelineSummary {
    pub id: String,
    pub id_column: String,
    pub total_events: usize,
    pub timeline: Vec<TimelineEvent>,
    pub accountability: Accountability,
}

impl TimelineSummary {
    pub fn new(id: &str, id_column: &str, timeline: Vec<TimelineEvent>) -> Self {
        Self {
            id: id.to_string(),
            id_column: id_column.to_string(),
            total_events: timeline.len(),
            accountability: compute_accountability(&timeline),
            timeline,
        }
    }
}
