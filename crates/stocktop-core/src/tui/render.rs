//! Table rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Text;
use ratatui::widgets::{Cell as TableCell, Paragraph, Row, Table};

use crate::view::{CellAlign, DisplayColumn};

use super::app::AppState;
use super::style::Styles;

/// Main render function. Pure function of the state: identical input draws
/// the identical screen.
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(frame.area());

    render_header(frame, chunks[0], state);
    render_table(frame, chunks[1], &state.display_columns());
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let updated = match state.last_update() {
        Some(at) => format!("updated {}", at.format("%H:%M:%S")),
        None => "waiting for data".to_string(),
    };
    let line = format!(" stocktop | {} symbols | {}", state.row_count(), updated);
    frame.render_widget(Paragraph::new(line).style(Styles::header()), area);
}

fn render_table(frame: &mut Frame, area: Rect, columns: &[DisplayColumn]) {
    let row_count = columns.first().map_or(0, |c| c.cells.len());

    let header = Row::new(columns.iter().map(|c| cell(&c.label, c.align)))
        .style(Styles::table_header())
        .height(1);
    let rows = (0..row_count)
        .map(|row| Row::new(columns.iter().map(move |c| cell(&c.cells[row], c.align))).height(1));
    let constraints: Vec<Constraint> = columns
        .iter()
        .map(|c| Constraint::Length(c.width()))
        .collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(2)
        .style(Styles::default());
    frame.render_widget(table, area);
}

fn cell(text: &str, align: CellAlign) -> TableCell<'static> {
    let alignment = match align {
        CellAlign::Left => Alignment::Left,
        CellAlign::Right => Alignment::Right,
    };
    TableCell::from(Text::from(text.to_string()).alignment(alignment))
}
