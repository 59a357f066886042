//! IEX-style batch quote client.
//!
//! One GET per poll: `?symbols=AAPL,MSFT&types=quote&token=...`, answered as
//! `{"AAPL": {"quote": {field: value, ...}}, ...}`. Rows follow the
//! requested symbol order regardless of response key order.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config::FieldSpec;
use crate::snapshot::{Cell, Snapshot};

use super::{FeedError, QuoteFeed};

pub const DEFAULT_BASE_URL: &str = "https://cloud.iexapis.com/stable/stock/market/batch";

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    quote: HashMap<String, Value>,
}

/// Blocking HTTP feed against a batch quote endpoint.
pub struct IexFeed {
    client: reqwest::blocking::Client,
    base_url: String,
    symbols: Vec<String>,
    fields: Vec<FieldSpec>,
    token: String,
}

impl IexFeed {
    pub fn new(
        symbols: Vec<String>,
        fields: Vec<FieldSpec>,
        token: String,
    ) -> Result<Self, FeedError> {
        Self::with_base_url(DEFAULT_BASE_URL, symbols, fields, token)
    }

    /// Alternative gateway, also used by tests.
    pub fn with_base_url(
        base_url: impl Into<String>,
        symbols: Vec<String>,
        fields: Vec<FieldSpec>,
        token: String,
    ) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| FeedError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            symbols,
            fields,
            token,
        })
    }
}

impl QuoteFeed for IexFeed {
    fn poll(&mut self) -> Result<Snapshot, FeedError> {
        let symbols = self.symbols.join(",");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("symbols", symbols.as_str()),
                ("types", "quote"),
                ("token", self.token.as_str()),
            ])
            .send()
            .map_err(|e| FeedError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| FeedError::Http(e.to_string()))?;

        let body: HashMap<String, QuoteEnvelope> = response
            .json()
            .map_err(|e| FeedError::Decode(e.to_string()))?;
        snapshot_from_quotes(&self.symbols, &self.fields, &body)
    }
}

/// Assembles a snapshot from a decoded batch response, preserving the
/// requested symbol order.
fn snapshot_from_quotes(
    symbols: &[String],
    fields: &[FieldSpec],
    body: &HashMap<String, QuoteEnvelope>,
) -> Result<Snapshot, FeedError> {
    let missing: Vec<String> = symbols
        .iter()
        .filter(|s| !body.contains_key(*s))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(FeedError::MissingSymbols(missing));
    }

    let rows = symbols
        .iter()
        .map(|symbol| {
            let quote = &body[symbol].quote;
            fields
                .iter()
                .map(|f| cell_from_value(quote.get(&f.field)))
                .collect()
        })
        .collect();
    Snapshot::from_rows(fields.iter().map(|f| f.label.clone()), rows)
        .map_err(|e| FeedError::Decode(e.to_string()))
}

fn cell_from_value(value: Option<&Value>) -> Cell {
    match value {
        None | Some(Value::Null) => Cell::Null,
        Some(Value::String(s)) => Cell::Text(s.clone()),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => Cell::Float(n.as_f64().unwrap_or(0.0)),
        },
        Some(other) => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::plain("symbol"),
            FieldSpec::new("latestPrice", "current"),
            FieldSpec::new("marketCap", "mktCap"),
            FieldSpec::new("peRatio", "p/e"),
        ]
    }

    fn body(value: Value) -> HashMap<String, QuoteEnvelope> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_rows_follow_requested_symbol_order() {
        let body = body(json!({
            "MSFT": {"quote": {"symbol": "MSFT", "latestPrice": 300.5, "marketCap": 1_800_000_000_000_i64, "peRatio": 32.1}},
            "AAPL": {"quote": {"symbol": "AAPL", "latestPrice": 150.25, "marketCap": 2_400_000_000_000_i64, "peRatio": 24.9}},
        }));
        let snapshot =
            snapshot_from_quotes(&strings(&["AAPL", "MSFT"]), &fields(), &body).unwrap();

        assert_eq!(snapshot.row_count(), 2);
        assert_eq!(*snapshot.cell(0, 0), Cell::Text("AAPL".to_string()));
        assert_eq!(*snapshot.cell(0, 1), Cell::Text("MSFT".to_string()));
        // Labels come from the field mapping, not the API names.
        let names: Vec<&str> = snapshot
            .columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["symbol", "current", "mktCap", "p/e"]);
    }

    #[test]
    fn test_json_types_map_to_cells() {
        let body = body(json!({
            "AAPL": {"quote": {"symbol": "AAPL", "latestPrice": 150.25, "marketCap": 2_400_000_000_000_i64, "peRatio": null}},
        }));
        let snapshot = snapshot_from_quotes(&strings(&["AAPL"]), &fields(), &body).unwrap();

        assert_eq!(*snapshot.cell(0, 0), Cell::Text("AAPL".to_string()));
        assert_eq!(*snapshot.cell(1, 0), Cell::Float(150.25));
        assert_eq!(*snapshot.cell(2, 0), Cell::Int(2_400_000_000_000));
        assert_eq!(*snapshot.cell(3, 0), Cell::Null);
    }

    #[test]
    fn test_field_absent_from_quote_becomes_null() {
        let body = body(json!({
            "AAPL": {"quote": {"symbol": "AAPL"}},
        }));
        let snapshot = snapshot_from_quotes(&strings(&["AAPL"]), &fields(), &body).unwrap();
        assert_eq!(*snapshot.cell(1, 0), Cell::Null);
    }

    #[test]
    fn test_missing_symbols_are_an_error() {
        let body = body(json!({
            "AAPL": {"quote": {"symbol": "AAPL"}},
        }));
        let err =
            snapshot_from_quotes(&strings(&["AAPL", "MSFT", "GOOG"]), &fields(), &body)
                .unwrap_err();
        match err {
            FeedError::MissingSymbols(missing) => {
                assert_eq!(missing, strings(&["MSFT", "GOOG"]))
            }
            other => panic!("expected missing symbols, got {other:?}"),
        }
    }
}
