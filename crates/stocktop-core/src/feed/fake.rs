//! Offline feed with randomly drifting quotes.
//!
//! Stands in for the network client during demos and development: a seeded
//! table in the configured schema whose numeric cells drift by a few percent
//! on every poll.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FieldSpec;
use crate::snapshot::{Cell, Snapshot};

use super::{FeedError, QuoteFeed};

pub struct FakeFeed {
    labels: Vec<String>,
    rows: Vec<Vec<Cell>>,
    rng: StdRng,
}

impl FakeFeed {
    pub fn new(symbols: &[String], fields: &[FieldSpec]) -> Self {
        Self::with_rng(symbols, fields, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn seeded(symbols: &[String], fields: &[FieldSpec], seed: u64) -> Self {
        Self::with_rng(symbols, fields, StdRng::seed_from_u64(seed))
    }

    fn with_rng(symbols: &[String], fields: &[FieldSpec], rng: StdRng) -> Self {
        let rows = symbols
            .iter()
            .enumerate()
            .map(|(row, symbol)| {
                fields
                    .iter()
                    .enumerate()
                    .map(|(col, spec)| base_cell(symbol, &spec.field, row, col))
                    .collect()
            })
            .collect();
        Self {
            labels: fields.iter().map(|f| f.label.clone()).collect(),
            rows,
            rng,
        }
    }
}

impl QuoteFeed for FakeFeed {
    fn poll(&mut self) -> Result<Snapshot, FeedError> {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                if let Cell::Float(v) = cell {
                    *v *= self.rng.gen_range(0.97..1.03);
                }
            }
        }
        Snapshot::from_rows(self.labels.clone(), self.rows.clone())
            .map_err(|e| FeedError::Decode(e.to_string()))
    }
}

/// Plausible starting values per field, spread out so sorting has something
/// to do.
fn base_cell(symbol: &str, field: &str, row: usize, col: usize) -> Cell {
    let r = row as f64;
    match field {
        "symbol" => Cell::Text(symbol.to_string()),
        "marketCap" => Cell::Float(2.3e12 - 3.9e11 * r),
        "peRatio" => Cell::Float(24.0 + 3.5 * r),
        _ => Cell::Float(96.0 + 41.0 * r + 1.5 * col as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_fields;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_matches_field_labels() {
        let mut feed = FakeFeed::seeded(&strings(&["AAPL", "MSFT"]), &default_fields(), 7);
        let snapshot = feed.poll().unwrap();

        let names: Vec<&str> = snapshot
            .columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["symbol", "current", "open", "close", "mktCap", "p/e"]
        );
        assert_eq!(snapshot.row_count(), 2);
        assert_eq!(*snapshot.cell(0, 0), Cell::Text("AAPL".to_string()));
        assert_eq!(*snapshot.cell(0, 1), Cell::Text("MSFT".to_string()));
    }

    #[test]
    fn test_numeric_cells_drift_but_symbols_hold() {
        let mut feed = FakeFeed::seeded(&strings(&["AAPL"]), &default_fields(), 7);
        let first = feed.poll().unwrap();
        let second = feed.poll().unwrap();

        assert_eq!(first.cell(0, 0), second.cell(0, 0));
        assert_ne!(first.cell(1, 0), second.cell(1, 0));
        assert!(second.is_numeric_column(1));
    }

    #[test]
    fn test_market_cap_is_abbreviation_sized() {
        let mut feed = FakeFeed::seeded(&strings(&["AAPL"]), &default_fields(), 7);
        let snapshot = feed.poll().unwrap();
        match snapshot.cell(4, 0) {
            Cell::Float(v) => assert!(*v > 1e9),
            other => panic!("expected float market cap, got {other:?}"),
        }
    }
}
