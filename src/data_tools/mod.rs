//! CSV-backed investigation data tools
//!
//! Loads a directory of delimited files on demand and answers filtered
//! queries, cross-source timelines, cost rankings and report assembly.
//! Nothing is cached: every call reads the files again.

pub mod cost;
pub mod errors;
pub mod query;
pub mod record;
pub mod report;
pub mod source_reader;
pub mod timeline;

pub use cost::{
    compare, cost_analysis, CostAnalysis, ExpectedCostPolicy, RankedOption, ResolutionOption,
};
pub use errors::{DataError, ErrorKind, Result};
pub use query::{query, FilterValue, Filters, QueryResult};
pub use record::{Record, Table};
pub use report::{compose_report, Findings, Report, ReportHeader, Signoff, SignoffEntry};
pub use source_reader::{load_table, DataStore, SourceInfo};
pub use timeline::{
    build_timeline, compute_accountability, Accountability, OwnerShare, TimelineEvent,
    TimelineSummary, DEFAULT_ID_COLUMN,
};
