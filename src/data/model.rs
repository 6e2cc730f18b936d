use std::cmp::Ordering;
use std::fmt;

use super::DataError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a dataframe reader infers
/// from delimited text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so rows can be sorted by any column --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            // Mixed numeric columns compare by value.
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (String(a), String(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "None"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – a loaded dataset
// ---------------------------------------------------------------------------

/// An in-memory table: named, ordered columns and rows that all share the
/// header's width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Column names in header order.
    pub columns: Vec<String>,
    /// Rows in source order; each has exactly `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, rejecting rows whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, DataError> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(DataError::RaggedRow {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        Ok(Table { columns, rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of `name` in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Project the table onto `columns`, in the order given.
    ///
    /// Fails with [`DataError::UnknownColumn`] if any name is absent.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<Table, DataError> {
        let indices = columns
            .iter()
            .map(|name| {
                self.column_index(name.as_ref())
                    .ok_or_else(|| DataError::UnknownColumn(name.as_ref().to_string()))
            })
            .collect::<Result<Vec<usize>, DataError>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Table {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows,
        })
    }

    /// Row indices ordered by the given column. The sort is stable, so rows
    /// with equal keys keep their source order. The table itself is untouched.
    pub fn sorted_row_order(&self, column: usize, descending: bool) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        if column >= self.columns.len() {
            return order;
        }
        order.sort_by(|&a, &b| {
            let ord = self.rows[a][column].cmp(&self.rows[b][column]);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        order
    }
}

// ---------------------------------------------------------------------------
// DatasetKind – the four datasets behind the tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatasetKind {
    Past,
    Future,
    Yearly,
    Weekly,
}

impl DatasetKind {
    /// Tab order.
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Past,
        DatasetKind::Future,
        DatasetKind::Yearly,
        DatasetKind::Weekly,
    ];

    pub fn tab_label(self) -> &'static str {
        match self {
            DatasetKind::Past => "Past Games",
            DatasetKind::Future => "Future Games",
            DatasetKind::Yearly => "Yearly Performance",
            DatasetKind::Weekly => "Weekly Performance",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            DatasetKind::Past => "Past Games",
            DatasetKind::Future => "Future Games",
            DatasetKind::Yearly => "Yearly Model Performance Summary",
            DatasetKind::Weekly => "Weekly Model Performance Summary",
        }
    }

    pub fn subheader(self) -> Option<&'static str> {
        match self {
            DatasetKind::Past => Some("Historical Bet Results"),
            DatasetKind::Future => None,
            DatasetKind::Yearly => Some("Model's Performance by Year"),
            DatasetKind::Weekly => Some("Model's Performance by Week"),
        }
    }

    /// File name used unless the config names another one.
    pub fn default_file_name(self) -> &'static str {
        match self {
            DatasetKind::Past => "past.csv",
            DatasetKind::Future => "future.csv",
            DatasetKind::Yearly => "final_model_performance_summary.csv",
            DatasetKind::Weekly => "bet_summary_by_season_week.csv",
        }
    }

    /// Whether the access gate applies to this dataset's view.
    pub fn is_gated(self) -> bool {
        matches!(self, DatasetKind::Future)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["season".into(), "team".into(), "units".into()],
            vec![
                vec![
                    CellValue::Integer(2023),
                    CellValue::String("KC".into()),
                    CellValue::Float(1.5),
                ],
                vec![
                    CellValue::Integer(2022),
                    CellValue::String("BUF".into()),
                    CellValue::Null,
                ],
                vec![
                    CellValue::Integer(2024),
                    CellValue::String("DET".into()),
                    CellValue::Integer(-2),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Integer(1)]],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::RaggedRow { row: 0, expected: 2, found: 1 }));
    }

    #[test]
    fn select_uses_requested_order() {
        let t = sample().select(&["units", "season"]).unwrap();
        assert_eq!(t.columns, vec!["units", "season"]);
        assert_eq!(t.rows[0], vec![CellValue::Float(1.5), CellValue::Integer(2023)]);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn select_unknown_column_fails() {
        let err = sample().select(&["season", "total_line"]).unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn(c) if c == "total_line"));
    }

    #[test]
    fn sorted_row_order_puts_nulls_first_and_mixes_numbers() {
        let t = sample();
        assert_eq!(t.sorted_row_order(2, false), vec![1, 2, 0]);
        assert_eq!(t.sorted_row_order(2, true), vec![0, 2, 1]);
        assert_eq!(t.sorted_row_order(0, false), vec![1, 0, 2]);
    }

    #[test]
    fn sorted_row_order_out_of_range_is_identity() {
        assert_eq!(sample().sorted_row_order(9, true), vec![0, 1, 2]);
    }

    #[test]
    fn only_future_is_gated() {
        let gated: Vec<_> = DatasetKind::ALL.iter().filter(|k| k.is_gated()).collect();
        assert_eq!(gated, vec![&DatasetKind::Future]);
    }
}
