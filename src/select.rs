//! Streaming N-th minimum selection over a decoded [`Sheet`].
//!
//! The scan is a single pass in document order (rows, then cells). Each cell
//! passes through the interpretation policy in [`integer_candidate`]; accepted
//! candidates feed a bounded max-heap [`SelectionWindow`] of capacity `n`, so
//! the whole query runs in O(M log N) time and O(N) space, where M is the
//! number of accepted candidates. No full sort, no second pass.

use std::collections::BinaryHeap;

use crate::error::{SelectError, SelectResult};
use crate::sheet::{Cell, Sheet};

/// A size-bounded max-oriented container of the smallest candidates seen.
///
/// Holds at most `capacity` values. Once full, a new candidate enters only by
/// evicting the current maximum, and only when strictly smaller than it. When
/// full, [`SelectionWindow::max`] is the running candidate for the N-th
/// smallest value.
#[derive(Debug, Clone)]
pub struct SelectionWindow {
    capacity: usize,
    heap: BinaryHeap<i64>,
}

impl SelectionWindow {
    /// Create an empty window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Offer a candidate to the window.
    ///
    /// Inserts while below capacity; at capacity, replaces the maximum iff
    /// `value` is strictly smaller. Rejected candidates never enter.
    pub fn offer(&mut self, value: i64) {
        if self.heap.len() < self.capacity {
            self.heap.push(value);
        } else if self.heap.peek().is_some_and(|max| value < *max) {
            self.heap.pop();
            self.heap.push(value);
        }
    }

    /// Number of values currently held. Never exceeds the capacity.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the window holds no values.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The largest value currently held, if any.
    pub fn max(&self) -> Option<i64> {
        self.heap.peek().copied()
    }
}

/// Cell interpretation policy: the integer candidate a cell contributes, if any.
///
/// - Numeric cells qualify only when finite, with zero fractional part, and
///   representable as `i64`; the candidate is the equal whole number.
/// - Text cells qualify when the whitespace-trimmed text parses as a base-10
///   integer.
/// - Everything else is skipped silently.
pub fn integer_candidate(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Numeric(f) => {
            // The upper bound is strict: `i64::MAX as f64` rounds up to 2^63,
            // which is not representable as i64. `i64::MIN as f64` is exact.
            if f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                Some(*f as i64)
            } else {
                None
            }
        }
        Cell::Text(s) => s.trim().parse::<i64>().ok(),
        Cell::Other => None,
    }
}

/// Return the `n`-th smallest accepted integer in `sheet` (rank 1 = smallest).
///
/// Scans every cell once in document order, feeding accepted candidates into a
/// [`SelectionWindow`] of capacity `n`. Fails with
/// [`SelectError::InsufficientData`] when fewer than `n` candidates are
/// accepted; `n = 0` fails with [`SelectError::InvalidArgument`].
///
/// Ties at the `n`-th rank resolve by value: among duplicate values, any one
/// instance satisfies the contract.
pub fn nth_min(sheet: &Sheet, n: usize) -> SelectResult<i64> {
    if n == 0 {
        return Err(SelectError::InvalidArgument {
            message: "number N should be positive".to_string(),
        });
    }

    let mut window = SelectionWindow::new(n);
    let mut accepted: usize = 0;

    for row in sheet.rows() {
        for cell in row {
            if let Some(v) = integer_candidate(cell) {
                accepted += 1;
                window.offer(v);
            }
        }
    }

    if accepted < n {
        return Err(SelectError::InsufficientData {
            found: accepted,
            requested: n,
        });
    }

    match window.max() {
        Some(v) => Ok(v),
        None => unreachable!("window holds n >= 1 values after the accepted-count check"),
    }
}
