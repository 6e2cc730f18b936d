/// Data layer: core types, loading, column policy and export.
///
/// Architecture:
/// ```text
///  default .csv / uploaded bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  ordered columns, typed cells
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  public / restricted column partition
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  displayed table → CSV
///   └──────────┘
/// ```
use std::path::PathBuf;

use thiserror::Error;

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

/// Everything that can go wrong while loading or projecting a table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin}: {detail}")]
    Shape { origin: String, detail: String },

    #[error("{0} has no header row")]
    MissingHeader(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("row {row} has {found} cells but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column '{0}' does not exist in this dataset")]
    UnknownColumn(String),
}
