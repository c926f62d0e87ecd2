use std::ops::Range;

use crate::foundation::error::{EdgeError, EdgeResult};

/// Half-open row range `[start, end)` in absolute buffer rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowRange {
    /// Inclusive first row.
    pub start: usize,
    /// Exclusive end row.
    pub end: usize,
}

impl RowRange {
    /// Create a range. `start > end` yields an empty range at `start`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of rows in the range.
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// `true` when the range has no rows.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// `true` when `row` is inside `[start, end)`.
    pub fn contains(self, row: usize) -> bool {
        self.start <= row && row < self.end
    }

    /// The same range as a std [`Range`].
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Contiguous split of a row span into near-equal parts.
///
/// For `rows` rows and `parts` requested parts the plan holds `min(parts, rows)` ranges. Each
/// range has `base = rows / n` rows, and the first `rows % n` ranges get one extra row. Ranges are
/// ascending, non-empty, non-overlapping, and together cover the span exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionPlan {
    first_row: usize,
    rows: usize,
    base: usize,
    extra: usize,
    ranges: Vec<RowRange>,
}

impl PartitionPlan {
    /// Split the `rows` rows starting at `first_row` into at most `parts` ranges.
    pub fn new(first_row: usize, rows: usize, parts: usize) -> EdgeResult<Self> {
        if parts == 0 {
            return Err(EdgeError::validation("partition count must be >= 1"));
        }
        let n = parts.min(rows);
        if n == 0 {
            return Ok(Self {
                first_row,
                rows,
                base: 0,
                extra: 0,
                ranges: Vec::new(),
            });
        }

        let base = rows / n;
        let extra = rows % n;
        let mut ranges = Vec::with_capacity(n);
        let mut start = first_row;
        for i in 0..n {
            let len = if i < extra { base + 1 } else { base };
            ranges.push(RowRange::new(start, start + len));
            start += len;
        }

        Ok(Self {
            first_row,
            rows,
            base,
            extra,
            ranges,
        })
    }

    /// Split the stencil rows `[1, height - 1)` of a `height`-row image.
    pub fn interior(height: usize, parts: usize) -> EdgeResult<Self> {
        Self::new(1, height.saturating_sub(2), parts)
    }

    /// Ranges in ascending row order.
    pub fn ranges(&self) -> &[RowRange] {
        &self.ranges
    }

    /// Number of ranges, after clamping to the row count.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// `true` when there are no rows to split.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total rows covered.
    pub fn total_rows(&self) -> usize {
        self.rows
    }

    /// First covered row.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Rows in every range that does not receive a remainder row.
    pub fn base_rows(&self) -> usize {
        self.base
    }

    /// How many leading ranges receive one extra row.
    pub fn extra_rows(&self) -> usize {
        self.extra
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/partition.rs"]
mod tests;
