//! Pure formatting: typed cells to display strings.
//!
//! Numeric values are abbreviated by magnitude (`1_500_000_000 -> "1.50B"`),
//! the sorted column's label gets a direction arrow, and everything else
//! passes through unchanged. No styles and no layout here.

use crate::snapshot::{Cell, Snapshot};
use crate::sort::{SortOrder, SortState};
use crate::view::{CellAlign, DisplayColumn};

/// Magnitude thresholds, largest first. A value is abbreviated by the first
/// threshold its absolute value strictly exceeds.
const ABBREVIATIONS: [(f64, &str); 3] = [(1e12, "T"), (1e9, "B"), (1e6, "M")];

/// Rendering for absent cells.
pub const NULL_MARKER: &str = "-";

/// Formats a whole snapshot into display columns, annotating the sorted
/// column's label with a direction arrow.
///
/// Panics if the sort state points outside the snapshot's schema; callers
/// must have run the state through [`SortState::on_snapshot`] first.
pub fn format_snapshot(snapshot: &Snapshot, sort: &SortState) -> Vec<DisplayColumn> {
    if let Some(column) = sort.column() {
        assert!(
            column < snapshot.column_count(),
            "sort column {column} out of range for {}-column snapshot",
            snapshot.column_count()
        );
    }

    snapshot
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let align = if index == 0 {
                CellAlign::Left
            } else {
                CellAlign::Right
            };
            DisplayColumn::new(
                column_label(&column.name, index, sort.order_for(index)),
                align,
                column.cells.iter().map(format_cell).collect(),
            )
        })
        .collect()
}

/// Label with the sort indicator affixed: prefixed on the row-label column
/// (index 0), suffixed elsewhere, so the arrow hugs the label text.
pub fn column_label(name: &str, index: usize, indicator: Option<SortOrder>) -> String {
    match indicator {
        None => name.to_string(),
        Some(order) => {
            let arrow = match order {
                SortOrder::Ascending => "▲",
                SortOrder::Descending => "▼",
            };
            if index == 0 {
                format!("{arrow} {name}")
            } else {
                format!("{name} {arrow}")
            }
        }
    }
}

pub fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Int(v) => format_int(*v),
        Cell::Float(v) => format_float(*v),
        Cell::Null => NULL_MARKER.to_string(),
    }
}

/// Integers below the smallest abbreviation threshold stay unabbreviated
/// (`42 -> "42"`); larger magnitudes get the two-decimal suffix form.
pub fn format_int(value: i64) -> String {
    if value == 0 {
        return "0.00".to_string();
    }
    abbreviate(value as f64).unwrap_or_else(|| value.to_string())
}

/// Floats render with two decimals, abbreviated above the thresholds.
/// Exactly zero renders as `"0.00"`, never an error.
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        return "0.00".to_string();
    }
    abbreviate(value).unwrap_or_else(|| format!("{value:.2}"))
}

fn abbreviate(value: f64) -> Option<String> {
    ABBREVIATIONS
        .iter()
        .find(|(threshold, _)| value.abs() > *threshold)
        .map(|(threshold, suffix)| format!("{:.2}{}", value / threshold, suffix))
}
