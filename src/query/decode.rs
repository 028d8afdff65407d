//! Decoder adapter: calamine workbook → [`Sheet`].
//!
//! Only the first sheet is decoded (single-sheet queries are the whole
//! surface). Any decoder failure, including a workbook with no sheets, is
//! wrapped as [`SelectError::SourceUnreadable`] so calamine internals never
//! leak to callers.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{SelectError, SelectResult};
use crate::sheet::{Cell, Sheet};

/// Decode the first sheet of the workbook at `path` into an in-memory [`Sheet`].
///
/// The workbook handle is scoped to this call and released on every exit
/// path.
pub fn decode_first_sheet(path: impl AsRef<Path>) -> SelectResult<Sheet> {
    let path = path.as_ref();

    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(path, e))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| unreadable(path, calamine::Error::Msg("workbook has no sheets")))?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| unreadable(path, e))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(Sheet::new(rows))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Float(f) => Cell::Numeric(*f),
        Data::Int(i) => Cell::Numeric(*i as f64),
        Data::String(s) => Cell::Text(s.clone()),
        // Empty, bool, datetime, duration, and error cells never contribute
        // candidates; the scan skips them.
        _ => Cell::Other,
    }
}

fn unreadable(path: &Path, source: calamine::Error) -> SelectError {
    SelectError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    }
}
