//! UI-agnostic view model produced by the formatter.
//!
//! A [`DisplayColumn`] carries presentation strings only; the TUI maps them
//! to ratatui widgets, and tests assert on them directly.

/// Horizontal cell alignment. The row-label column is left-aligned, every
/// other column right-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Right,
}

/// One labeled column of formatted cell strings, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayColumn {
    pub label: String,
    pub align: CellAlign,
    pub cells: Vec<String>,
}

impl DisplayColumn {
    pub fn new(label: String, align: CellAlign, cells: Vec<String>) -> Self {
        Self {
            label,
            align,
            cells,
        }
    }

    /// Widest content in display characters (label included).
    pub fn width(&self) -> u16 {
        self.cells
            .iter()
            .map(|c| c.chars().count())
            .chain([self.label.chars().count()])
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16
    }
}
