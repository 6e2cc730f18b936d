use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::model::{CellValue, Table};
use super::DataError;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where a dataset comes from for the current render.
#[derive(Debug, Clone, Copy)]
pub enum TableSource<'a> {
    /// The configured file on disk.
    Default(&'a Path),
    /// A replacement the viewer uploaded for this session, held in memory.
    Upload { file_name: &'a str, bytes: &'a [u8] },
}

impl TableSource<'_> {
    /// Human-readable origin used in error messages and logs.
    pub fn origin(&self) -> String {
        match self {
            TableSource::Default(path) => path.display().to_string(),
            TableSource::Upload { file_name, .. } => format!("uploaded file {file_name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from whichever source is active.
pub fn load_source(source: &TableSource<'_>) -> Result<Table, DataError> {
    match source {
        TableSource::Default(path) => load_file(path),
        TableSource::Upload { file_name, bytes } => {
            load_bytes(file_name, bytes, &source.origin())
        }
    }
}

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`         – comma-separated, header row required
/// * `.tsv`, `.tab` – tab-separated, header row required
/// * `.json`        – `[{ "column": value, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Table, DataError> {
    let bytes = std::fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    load_bytes(name, &bytes, &path.display().to_string())
}

/// Parse in-memory file contents, choosing the format from `file_name`.
pub fn load_bytes(file_name: &str, bytes: &[u8], origin: &str) -> Result<Table, DataError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_delimited(bytes, b',', origin),
        "tsv" | "tab" => load_delimited(bytes, b'\t', origin),
        "json" => load_json(bytes, origin),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line.  Short records are
/// padded with nulls; records wider than the header are rejected.
pub fn load_delimited(bytes: &[u8], delimiter: u8, origin: &str) -> Result<Table, DataError> {
    let csv_err = |source| DataError::Csv {
        origin: origin.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.is_empty() {
        return Err(DataError::MissingHeader(origin.to_string()));
    }
    let columns = dedupe_headers(headers.iter());
    let width = columns.len();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(DataError::Shape {
                origin: origin.to_string(),
                detail: format!("line {line} has {} fields, expected {width}", record.len()),
            });
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(width, String::new());
        raw_rows.push(row);
    }

    let types: Vec<ColumnType> = (0..width)
        .map(|c| infer_column_type(raw_rows.iter().map(|row| row[c].as_str())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&types)
                .map(|(cell, ty)| ty.parse(cell))
                .collect()
        })
        .collect();

    Table::new(columns, rows)
}

/// Blank names become `Unnamed: <i>`; repeats get `.1`, `.2`, … suffixes.
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::new();
    for (i, name) in raw.enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {i}")
        } else {
            name.to_string()
        };
        let mut candidate = base.clone();
        let mut n = 0;
        while used.contains(&candidate) {
            n += 1;
            candidate = format!("{base}.{n}");
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

// ---------------------------------------------------------------------------
// Column type inference
// ---------------------------------------------------------------------------

const NA_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// NA markers, plus any other spelling `f64` parses as NaN (`NAN`, `-nan`).
fn is_na(s: &str) -> bool {
    NA_MARKERS.contains(&s) || s.trim().parse::<f64>().is_ok_and(f64::is_nan)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Float,
    Bool,
    Text,
}

/// A column is numeric or boolean only if every non-null cell is; a mix of
/// integers and floats widens to float, anything else falls back to text.
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut inferred: Option<ColumnType> = None;
    for s in cells.filter(|s| !is_na(s)) {
        // Numbers may be padded with spaces, e.g. `2024, 7`.
        let n = s.trim();
        let cell = if n.parse::<i64>().is_ok() {
            ColumnType::Integer
        } else if n.parse::<f64>().is_ok() {
            ColumnType::Float
        } else if parse_bool(s).is_some() {
            ColumnType::Bool
        } else {
            ColumnType::Text
        };
        let next = match (inferred, cell) {
            (None, t) => t,
            (Some(a), b) if a == b => a,
            (Some(ColumnType::Integer), ColumnType::Float)
            | (Some(ColumnType::Float), ColumnType::Integer) => ColumnType::Float,
            _ => ColumnType::Text,
        };
        if next == ColumnType::Text {
            return next;
        }
        inferred = Some(next);
    }
    inferred.unwrap_or(ColumnType::Text)
}

impl ColumnType {
    fn parse(self, s: String) -> CellValue {
        if is_na(&s) {
            return CellValue::Null;
        }
        match self {
            ColumnType::Integer => match s.trim().parse::<i64>() {
                Ok(i) => CellValue::Integer(i),
                Err(_) => CellValue::String(s),
            },
            ColumnType::Float => match s.trim().parse::<f64>() {
                Ok(f) => CellValue::Float(f),
                Err(_) => CellValue::String(s),
            },
            ColumnType::Bool => match parse_bool(&s) {
                Some(b) => CellValue::Bool(b),
                None => CellValue::String(s),
            },
            ColumnType::Text => CellValue::String(s),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "season": 2024, "week": 7, "home_team": "KC", "spread_line": -3.5 },
///   ...
/// ]
/// ```
///
/// Columns appear in first-seen key order; keys missing from a record are null.
fn load_json(bytes: &[u8], origin: &str) -> Result<Table, DataError> {
    let root: JsonValue = serde_json::from_slice(bytes).map_err(|source| DataError::Json {
        origin: origin.to_string(),
        source,
    })?;

    let shape = |detail: String| DataError::Shape {
        origin: origin.to_string(),
        detail,
    };

    let records = root
        .as_array()
        .ok_or_else(|| shape("expected a top-level JSON array".to_string()))?;

    let mut objects = Vec::with_capacity(records.len());
    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| shape(format!("record {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    if columns.is_empty() {
        return Err(DataError::MissingHeader(origin.to_string()));
    }

    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Table::new(columns, rows)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}
