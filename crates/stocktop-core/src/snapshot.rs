//! Tabular snapshot data model.
//!
//! A [`Snapshot`] is one pull of quote data for all tracked symbols: ordered,
//! uniquely named columns of typed cells, aligned across columns by row index.
//! Snapshots are immutable once produced; sorting yields a new value.

use std::fmt;

/// A single typed table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    /// Absent value (field missing or null in the feed response).
    Null,
}

impl Cell {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Cell::Int(v) => Some(v as f64),
            Cell::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

/// One named column with its cells in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// Errors constructing a snapshot from feed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    DuplicateColumn(String),
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::DuplicateColumn(name) => write!(f, "duplicate column name: {name}"),
            SnapshotError::RowWidth {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has {actual} cells, expected {expected}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// One tabular pull of quote data at a point in time.
///
/// Invariant: column names are unique and every column has the same row
/// count. Row order is the arrival order from the feed (the requested symbol
/// order) and is what sort ties fall back to.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    columns: Vec<Column>,
}

impl Snapshot {
    /// Builds a snapshot from row-major feed data.
    ///
    /// Each row must have exactly one cell per column name.
    pub fn from_rows<N, S>(names: N, rows: Vec<Vec<Cell>>) -> Result<Self, SnapshotError>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(SnapshotError::DuplicateColumn(name.clone()));
            }
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != names.len() {
                return Err(SnapshotError::RowWidth {
                    row,
                    expected: names.len(),
                    actual: cells.len(),
                });
            }
        }

        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();
        for row in rows {
            for (column, cell) in columns.iter_mut().zip(row) {
                column.cells.push(cell);
            }
        }
        Ok(Snapshot { columns })
    }

    /// A single-column, zero-row snapshot carrying a status message in the
    /// column label. Used for feed failures and the startup screen.
    pub fn placeholder(message: &str) -> Self {
        Snapshot {
            columns: vec![Column {
                name: message.to_string(),
                cells: Vec::new(),
            }],
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// Panics if out of range; callers are expected to have validated the
    /// index against the schema.
    pub fn cell(&self, column: usize, row: usize) -> &Cell {
        &self.columns[column].cells[row]
    }

    /// A column counts as numeric when it has at least one numeric cell and
    /// no text cells (absent values do not disqualify it).
    pub fn is_numeric_column(&self, index: usize) -> bool {
        let mut numeric = false;
        for cell in &self.columns[index].cells {
            match cell {
                Cell::Text(_) => return false,
                Cell::Int(_) | Cell::Float(_) => numeric = true,
                Cell::Null => {}
            }
        }
        numeric
    }

    /// New snapshot with rows permuted by `order`.
    pub fn with_row_order(&self, order: &[usize]) -> Snapshot {
        debug_assert_eq!(order.len(), self.row_count());
        Snapshot {
            columns: self
                .columns
                .iter()
                .map(|column| Column {
                    name: column.name.clone(),
                    cells: order.iter().map(|&i| column.cells[i].clone()).collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes() -> Snapshot {
        Snapshot::from_rows(
            ["symbol", "price"],
            vec![
                vec!["AAPL".into(), 150.0.into()],
                vec!["MSFT".into(), 300.0.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_builds_columns() {
        let snapshot = quotes();
        assert_eq!(snapshot.column_count(), 2);
        assert_eq!(snapshot.row_count(), 2);
        assert_eq!(snapshot.columns()[0].name, "symbol");
        assert_eq!(*snapshot.cell(1, 1), Cell::Float(300.0));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = Snapshot::from_rows(
            ["symbol", "price"],
            vec![vec!["AAPL".into(), 150.0.into()], vec!["MSFT".into()]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SnapshotError::RowWidth {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_duplicate_names() {
        let err = Snapshot::from_rows(["price", "price"], vec![]).unwrap_err();
        assert_eq!(err, SnapshotError::DuplicateColumn("price".to_string()));
    }

    #[test]
    fn test_placeholder_has_message_column_and_no_rows() {
        let snapshot = Snapshot::placeholder("Connection lost!");
        assert_eq!(snapshot.column_count(), 1);
        assert_eq!(snapshot.row_count(), 0);
        assert_eq!(snapshot.columns()[0].name, "Connection lost!");
    }

    #[test]
    fn test_numeric_column_detection() {
        let snapshot = Snapshot::from_rows(
            ["symbol", "price", "cap", "mixed"],
            vec![
                vec!["AAPL".into(), 150.0.into(), Cell::Null, "n/a".into()],
                vec!["MSFT".into(), 300.0.into(), Cell::Int(10), 1.0.into()],
            ],
        )
        .unwrap();
        assert!(!snapshot.is_numeric_column(0));
        assert!(snapshot.is_numeric_column(1));
        // Nulls do not disqualify a numeric column.
        assert!(snapshot.is_numeric_column(2));
        // A text cell does.
        assert!(!snapshot.is_numeric_column(3));
    }

    #[test]
    fn test_all_null_column_is_not_numeric() {
        let snapshot =
            Snapshot::from_rows(["symbol", "p/e"], vec![vec!["AAPL".into(), Cell::Null]]).unwrap();
        assert!(!snapshot.is_numeric_column(1));
    }

    #[test]
    fn test_with_row_order_permutes_every_column() {
        let reordered = quotes().with_row_order(&[1, 0]);
        assert_eq!(*reordered.cell(0, 0), Cell::Text("MSFT".to_string()));
        assert_eq!(*reordered.cell(1, 0), Cell::Float(300.0));
        assert_eq!(*reordered.cell(0, 1), Cell::Text("AAPL".to_string()));
    }
}
