//! Source discovery and loading
//!
//! Every call goes back to the filesystem. Nothing is cached between calls,
//! so edits to the CSV files are visible on the next query.

use std::path::{Path, PathBuf};

use polars::prelude::{CsvReadOptions, DataFrame, PolarsError, SerReader};
use serde::Serialize;
use tracing::{debug, warn};

use super::errors::{DataError, Result};
use super::record::{Record, Table};

/// Metadata about one discoverable source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    /// File stem ("sensor_alerts")
    pub name: String,
    /// Path relative to the data root
    pub path: String,
    /// Parent directory name ("iot", "wms", ...)
    pub category: String,
    /// Header columns
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// First data row, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_record: Option<Record>,
    /// Why the file could not be read (columns are then empty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Read-only view of a directory tree of CSV files
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    /// Create a store rooted at `root` (not checked until first access)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All CSV files under the root, sorted for deterministic discovery order
    pub fn source_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(DataError::DirectoryNotFound(
                self.root.display().to_string(),
            ));
        }

        let pattern = self.root.join("**").join("*.csv");
        let entries = glob::glob(&pattern.to_string_lossy()).map_err(|e| DataError::Csv {
            path: self.root.display().to_string(),
            message: format!("invalid discovery pattern: {}", e),
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    warn!("Skipping unreadable path during discovery: {}", e);
                    None
                }
            })
            .collect();
        files.sort();

        Ok(files)
    }

    /// Discover every source with its header and first row
    pub fn list_sources(&self) -> Result<Vec<SourceInfo>> {
        let paths = self.source_paths()?;
        debug!(
            "Discovered {} CSV sources under {}",
            paths.len(),
            self.root.display()
        );

        Ok(paths.iter().map(|path| self.describe(path)).collect())
    }

    fn describe(&self, path: &Path) -> SourceInfo {
        let name = source_name(path);
        let relative = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string();
        let category = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match read_frame(path, Some(1)) {
            Ok(frame) => {
                let (columns, mut rows) = frame_to_rows(&frame, path);
                SourceInfo {
                    name,
                    path: relative,
                    category,
                    columns,
                    sample_record: if rows.is_empty() {
                        None
                    } else {
                        Some(rows.swap_remove(0))
                    },
                    error: None,
                }
            }
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                SourceInfo {
                    name,
                    path: relative,
                    category,
                    columns: Vec::new(),
                    sample_record: None,
                    error: Some(format!("Could not read: {}", e)),
                }
            }
        }
    }

    /// Resolve a source name to its file
    ///
    /// Matches the file stem case-insensitively (a trailing ".csv" is
    /// ignored). When no stem matches exactly, the first source whose stem
    /// contains the name is used.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let wanted = normalize_source_name(name);
        let paths = self.source_paths()?;

        let exact = paths
            .iter()
            .find(|p| source_name(p).to_lowercase() == wanted);
        let chosen = exact.or_else(|| {
            paths
                .iter()
                .find(|p| !wanted.is_empty() && source_name(p).to_lowercase().contains(&wanted))
        });

        chosen.cloned().ok_or_else(|| DataError::SourceNotFound {
            name: name.to_string(),
            searched_in: self.root.display().to_string(),
        })
    }

    /// Load the full row set of a source
    pub fn load(&self, name: &str) -> Result<Table> {
        let path = self.resolve(name)?;
        let table = load_table(&path)?;
        debug!(
            "Loaded {} ({} rows, {} columns)",
            path.display(),
            table.rows.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// Load every source in discovery order
    ///
    /// Unreadable files are skipped with a warning.
    pub fn load_all(&self) -> Result<Vec<Table>> {
        let paths = self.source_paths()?;
        let mut tables = Vec::with_capacity(paths.len());
        for path in &paths {
            match load_table(path) {
                Ok(table) => tables.push(table),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }
        Ok(tables)
    }
}

/// Load a single CSV file as a table of string values
pub fn load_table(path: &Path) -> Result<Table> {
    let frame = read_frame(path, None)?;
    let (columns, rows) = frame_to_rows(&frame, path);
    Ok(Table {
        name: source_name(path),
        path: path.to_path_buf(),
        columns,
        rows,
    })
}

fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn normalize_source_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.strip_suffix(".csv") {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

/// Read a CSV file with every column typed as string
fn read_frame(path: &Path, n_rows: Option<usize>) -> Result<DataFrame> {
    let csv_error = |e: PolarsError| DataError::Csv {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_n_rows(n_rows)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(csv_error)?
        .finish()
        .map_err(csv_error)
}

fn frame_to_rows(frame: &DataFrame, path: &Path) -> (Vec<String>, Vec<Record>) {
    let columns: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect();
    let mut rows = vec![Record::new(); frame.height()];

    for (series, column) in frame.get_columns().iter().zip(&columns) {
        match series.str() {
            Ok(values) => {
                for (row, value) in rows.iter_mut().zip(values.into_iter()) {
                    row.insert(column.clone(), value.unwrap_or_default());
                }
            }
            Err(e) => {
                warn!(
                    "Column '{}' in {} is not text ({}); leaving it empty",
                    column,
                    path.display(),
                    e
                );
                for row in rows.iter_mut() {
                    row.insert(column.clone(), "");
                }
            }
        }
    }

    (columns, rows)
}
