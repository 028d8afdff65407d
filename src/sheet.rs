//! Decoded spreadsheet model.
//!
//! The decoder produces a [`Sheet`]: ordered rows of ordered, tagged
//! [`Cell`]s. The model is deliberately minimal; everything the selection
//! scan skips (empty cells, booleans, dates, cell errors) collapses into
//! [`Cell::Other`].

/// A single tagged cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A numeric cell, as the decoder's floating-point value.
    Numeric(f64),
    /// A text cell.
    Text(String),
    /// Any other cell kind (empty, boolean, date, error). Never a candidate.
    Other,
}

/// An in-memory sheet: row-major cell storage.
///
/// Produced by the decoder, owned by exactly one selection call, and read-only
/// during the scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Create a sheet from rows of cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Number of rows in the sheet.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate rows in document order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}
