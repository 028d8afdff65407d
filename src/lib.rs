//! `xlsx-nth-min` finds the N-th smallest integer value in an `.xlsx`
//! workbook, scanning cells in row-major document order with a single
//! streaming pass.
//!
//! The primary entrypoint is [`query::find_nth_min_from_path`], which
//! validates the request, decodes the first sheet, and runs the bounded
//! selection. The scan keeps at most N values in memory (a fixed-capacity
//! max-heap), so a query over M accepted numbers costs O(M log N) time and
//! O(N) space, with no full sort and no second pass.
//!
//! ## What counts as a number
//!
//! - Numeric cells contribute a candidate only when finite with zero
//!   fractional part (`5.0` contributes `5`; `5.5`, `NaN`, and infinities are
//!   skipped).
//! - Text cells contribute when the whitespace-trimmed text parses as a
//!   base-10 integer (`"7"` contributes `7`; `"abc"` is skipped).
//! - Every other cell kind (empty, boolean, date, error) is skipped silently.
//!
//! Skipped cells are never errors; the only data-level failure is asking for
//! a rank larger than the number of accepted candidates
//! ([`SelectError::InsufficientData`]).
//!
//! ## Quick example
//!
//! ```no_run
//! use xlsx_nth_min::query::{find_nth_min_from_path, QueryOptions};
//!
//! # fn main() -> Result<(), xlsx_nth_min::SelectError> {
//! // Third-smallest integer on the first sheet of numbers.xlsx.
//! let v = find_nth_min_from_path("numbers.xlsx", 3, &QueryOptions::default())?;
//! println!("3rd minimum = {v}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`query`]: caller-facing pipeline (validation, decoding, observability)
//! - [`select`]: the streaming bounded-selection algorithm
//! - [`sheet`]: the decoded sheet/cell model
//! - [`error`]: the error taxonomy

pub mod error;
pub mod query;
pub mod select;
pub mod sheet;

pub use error::{SelectError, SelectResult};
