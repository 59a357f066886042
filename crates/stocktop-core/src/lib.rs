//! stocktop-core — live sortable quote-table engine.
//!
//! Provides:
//! - `snapshot` — tabular snapshot data model (typed cells)
//! - `sort` — column-sort state machine (toggle, defaults, schema fallback)
//! - `fmt` — pure display formatting (magnitude abbreviation, sort arrows)
//! - `view` — UI-agnostic display columns
//! - `pipeline` — capacity-1 hand-off between poller and render loop
//! - `config` — symbol list, field mapping, credentials
//!
//! With `feed` feature (default):
//! - `feed` — HTTP batch quote client, fake feed, poller thread
//!
//! With `tui` feature (default):
//! - `tui` — TUI rendering (ratatui/crossterm), input, styles

pub mod config;
pub mod fmt;
pub mod pipeline;
pub mod snapshot;
pub mod sort;
pub mod view;

#[cfg(feature = "feed")]
pub mod feed;

#[cfg(feature = "tui")]
pub mod tui;
