//! Column-sort state machine.
//!
//! The sort state is an explicit value with pure transition functions: one
//! for snapshot arrivals (re-apply, or fall back to unsorted when the schema
//! changed) and one for user column selections (toggle on repeat, otherwise
//! a type-appropriate default direction). Applying a state to a snapshot is
//! a stable sort over the arrival row order, so rows tied on the sort key
//! never jitter between polls.

use std::cmp::Ordering;

use tracing::debug;

use crate::snapshot::{Cell, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Which column the table is sorted on, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    /// No sort applied; rows render in arrival order.
    #[default]
    Unset,
    Sorted { column: usize, order: SortOrder },
}

impl SortState {
    pub fn column(&self) -> Option<usize> {
        match *self {
            SortState::Sorted { column, .. } => Some(column),
            SortState::Unset => None,
        }
    }

    /// Direction indicator for `column`, if it is the sorted one.
    pub fn order_for(&self, column: usize) -> Option<SortOrder> {
        match *self {
            SortState::Sorted { column: c, order } if c == column => Some(order),
            _ => None,
        }
    }

    /// Transition for a new snapshot arrival: the state survives unchanged
    /// unless the sorted column no longer exists in the new schema, in which
    /// case the table falls back to unsorted rather than raising.
    #[must_use]
    pub fn on_snapshot(self, snapshot: &Snapshot) -> SortState {
        match self {
            SortState::Sorted { column, .. } if column >= snapshot.column_count() => {
                debug!("sorted column {column} left the schema, falling back to unsorted");
                SortState::Unset
            }
            other => other,
        }
    }

    /// Transition for a user column selection.
    ///
    /// Selecting the already sorted column flips the direction; selecting a
    /// different column picks its default direction (text ascending, numeric
    /// descending, the row-label column always ascending). An out-of-range
    /// selection is rejected: `None`, no state change.
    #[must_use]
    pub fn select(self, column: usize, snapshot: &Snapshot) -> Option<SortState> {
        if column >= snapshot.column_count() {
            return None;
        }
        let next = match self {
            SortState::Sorted { column: c, order } if c == column => SortState::Sorted {
                column,
                order: order.flipped(),
            },
            _ => SortState::Sorted {
                column,
                order: default_order(snapshot, column),
            },
        };
        Some(next)
    }

    /// Applies this state to a snapshot, returning the rows in display order.
    ///
    /// The sort is stable and always runs against the snapshot's arrival
    /// order, so tied rows keep their feed order in both directions.
    pub fn apply(&self, snapshot: &Snapshot) -> Snapshot {
        match *self {
            SortState::Unset => snapshot.clone(),
            SortState::Sorted { column, order } => {
                let mut index: Vec<usize> = (0..snapshot.row_count()).collect();
                index.sort_by(|&a, &b| {
                    let cmp = compare_cells(snapshot.cell(column, a), snapshot.cell(column, b));
                    match order {
                        SortOrder::Ascending => cmp,
                        SortOrder::Descending => cmp.reverse(),
                    }
                });
                snapshot.with_row_order(&index)
            }
        }
    }
}

/// Numeric columns sort largest-first by default; text columns and the
/// row-label column (index 0) sort ascending.
fn default_order(snapshot: &Snapshot, column: usize) -> SortOrder {
    if column != 0 && snapshot.is_numeric_column(column) {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    }
}

/// Total order across cell types: absent values first, then numbers
/// (compared numerically across `Int`/`Float`), then text.
fn compare_cells(a: &Cell, b: &Cell) -> Ordering {
    fn rank(cell: &Cell) -> u8 {
        match cell {
            Cell::Null => 0,
            Cell::Int(_) | Cell::Float(_) => 1,
            Cell::Text(_) => 2,
        }
    }

    match (a, b) {
        (Cell::Int(a), Cell::Int(b)) => a.cmp(b),
        (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => rank(a).cmp(&rank(b)),
        },
    }
}
