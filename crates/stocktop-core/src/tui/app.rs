//! Foreground render loop and display state.

use std::io;

use chrono::{DateTime, Local};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::fmt::format_snapshot;
use crate::pipeline::{Message, PipelineRx};
use crate::snapshot::Snapshot;
use crate::sort::SortState;
use crate::view::DisplayColumn;

use super::render::render;

/// Column label shown before the first snapshot arrives.
pub const FETCHING_PLACEHOLDER: &str = "Fetching data...";

/// What the loop should do after a message.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Render,
    /// Rejected input; the screen stays as it is.
    Skip,
    Quit,
}

/// All mutable display state, owned exclusively by the foreground loop.
///
/// The snapshot is kept in its arrival row order; sorting and formatting are
/// re-derived from it on every render so sort ties always fall back to feed
/// order rather than to whatever was last on screen.
pub struct AppState {
    snapshot: Option<Snapshot>,
    sort: SortState,
    last_update: Option<DateTime<Local>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            sort: SortState::Unset,
            last_update: None,
        }
    }

    fn handle_message(&mut self, message: Message) -> Step {
        match message {
            Message::Snapshot(snapshot) => {
                self.sort = self.sort.on_snapshot(&snapshot);
                self.snapshot = Some(snapshot);
                self.last_update = Some(Local::now());
                Step::Render
            }
            Message::SelectColumn(column) => {
                let Some(snapshot) = &self.snapshot else {
                    return Step::Skip;
                };
                match self.sort.select(column, snapshot) {
                    Some(next) => {
                        self.sort = next;
                        Step::Render
                    }
                    None => Step::Skip,
                }
            }
            Message::Redraw => Step::Render,
            Message::Quit => Step::Quit,
        }
    }

    /// Sorted, arrow-annotated display columns for the current snapshot, or
    /// the startup placeholder before the first arrival.
    pub fn display_columns(&self) -> Vec<DisplayColumn> {
        match &self.snapshot {
            Some(snapshot) => format_snapshot(&self.sort.apply(snapshot), &self.sort),
            None => format_snapshot(
                &Snapshot::placeholder(FETCHING_PLACEHOLDER),
                &SortState::Unset,
            ),
        }
    }

    pub fn row_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, Snapshot::row_count)
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }
}

/// The foreground application: owns the terminal and the display state.
pub struct App {
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    /// Runs the consumer loop until quit: one pipeline message at a time,
    /// strictly in arrival order, redrawing after each state change.
    pub fn run(mut self, rx: PipelineRx) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Placeholder screen until the first snapshot arrives.
        terminal.draw(|frame| render(frame, &self.state))?;

        while let Some(message) = rx.recv() {
            match self.state.handle_message(message) {
                Step::Render => {
                    terminal.draw(|frame| render(frame, &self.state))?;
                }
                Step::Skip => {}
                Step::Quit => break,
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}
