use std::ops::Range;

use crate::{
    exec::partition::{PartitionPlan, RowRange},
    foundation::error::{EdgeError, EdgeResult},
};

/// A single-channel 8-bit intensity image, row-major, tightly packed.
///
/// Invariant: `samples.len() == width * height`.
///
/// The buffer itself carries no synchronization. Concurrent writers obtain disjoint
/// [`RowBandMut`] views through [`PixelBuffer::bands_mut`]; the borrow checker then guarantees that
/// no two writers alias the same row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled `width x height` buffer.
    pub fn new(width: usize, height: usize) -> EdgeResult<Self> {
        let len = sample_count(width, height)?;
        Ok(Self {
            width,
            height,
            samples: vec![0u8; len],
        })
    }

    /// Wrap decoded row-major samples.
    pub fn from_raw(width: usize, height: usize, samples: Vec<u8>) -> EdgeResult<Self> {
        let expected = sample_count(width, height)?;
        if samples.len() != expected {
            return Err(EdgeError::validation(format!(
                "pixel buffer expects {expected} samples for {width}x{height}, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A buffer with no samples. This is what a failed decode hands to the engine.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Same dimensions, every sample zero.
    pub fn clone_zeroed(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            samples: vec![0u8; self.samples.len()],
        }
    }

    /// Width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` when the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Row-major sample slice.
    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the buffer and return its row-major samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }

    /// Rows eligible for the 3x3 stencil: `[1, height - 1)`.
    ///
    /// Empty when the buffer is shorter than three rows.
    pub fn interior_rows(&self) -> Range<usize> {
        1..self.height.saturating_sub(1).max(1)
    }

    /// Number of interior rows.
    pub fn interior_row_count(&self) -> usize {
        self.height.saturating_sub(2)
    }

    /// Read the sample at `(x, y)`.
    ///
    /// # Panics
    /// Panics when `(x, y)` is outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        match self.index_of(x, y) {
            Some(i) => self.samples[i],
            None => panic!("{}", EdgeError::out_of_bounds(x, y, self.width, self.height)),
        }
    }

    /// Write the sample at `(x, y)`.
    ///
    /// # Panics
    /// Panics when `(x, y)` is outside the buffer.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        match self.index_of(x, y) {
            Some(i) => self.samples[i] = value,
            None => panic!("{}", EdgeError::out_of_bounds(x, y, self.width, self.height)),
        }
    }

    /// Read the sample at `(x, y)`, reporting [`EdgeError::IndexOutOfBounds`] instead of panicking.
    pub fn checked_get(&self, x: usize, y: usize) -> EdgeResult<u8> {
        self.index_of(x, y)
            .map(|i| self.samples[i])
            .ok_or_else(|| EdgeError::out_of_bounds(x, y, self.width, self.height))
    }

    /// Write the sample at `(x, y)`, reporting [`EdgeError::IndexOutOfBounds`] instead of panicking.
    pub fn checked_set(&mut self, x: usize, y: usize, value: u8) -> EdgeResult<()> {
        let i = self
            .index_of(x, y)
            .ok_or_else(|| EdgeError::out_of_bounds(x, y, self.width, self.height))?;
        self.samples[i] = value;
        Ok(())
    }

    /// Borrow row `y`.
    ///
    /// # Panics
    /// Panics when `y >= height`.
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(
            y < self.height,
            "{}",
            EdgeError::out_of_bounds(0, y, self.width, self.height)
        );
        let start = y * self.width;
        &self.samples[start..start + self.width]
    }

    /// Mutable view over a contiguous row range.
    pub fn rows_mut(&mut self, range: RowRange) -> EdgeResult<RowBandMut<'_>> {
        if range.start > range.end || range.end > self.height {
            return Err(EdgeError::out_of_bounds(
                0,
                range.end.saturating_sub(1),
                self.width,
                self.height,
            ));
        }
        let width = self.width;
        let data = &mut self.samples[range.start * width..range.end * width];
        Ok(RowBandMut {
            first_row: range.start,
            width,
            data,
        })
    }

    /// Split the buffer into one mutable view per range of `plan`.
    ///
    /// Ranges must be ascending and non-overlapping (every [`PartitionPlan`] is). Rows not covered
    /// by the plan are left unreachable through the returned views.
    pub fn bands_mut(&mut self, plan: &PartitionPlan) -> EdgeResult<Vec<RowBandMut<'_>>> {
        let (width, height) = (self.width, self.height);
        let mut rest: &mut [u8] = &mut self.samples;
        let mut consumed_rows = 0usize;
        let mut bands = Vec::with_capacity(plan.len());

        for range in plan.ranges() {
            if range.start < consumed_rows || range.end < range.start || range.end > height {
                return Err(EdgeError::out_of_bounds(
                    0,
                    range.end.saturating_sub(1),
                    width,
                    height,
                ));
            }
            let skip = (range.start - consumed_rows) * width;
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
            let (band, tail) = tail.split_at_mut(range.len() * width);
            bands.push(RowBandMut {
                first_row: range.start,
                width,
                data: band,
            });
            rest = tail;
            consumed_rows = range.end;
        }

        Ok(bands)
    }

    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

/// Exclusive view over a contiguous run of rows of one [`PixelBuffer`].
///
/// Row indices passed to a band are absolute buffer rows, not offsets into the band.
#[derive(Debug)]
pub struct RowBandMut<'a> {
    first_row: usize,
    width: usize,
    data: &'a mut [u8],
}

impl RowBandMut<'_> {
    /// Absolute rows covered by this band.
    pub fn rows(&self) -> Range<usize> {
        self.first_row..self.first_row + self.row_count()
    }

    /// Number of rows in the band.
    pub fn row_count(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    /// Width in samples of every row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mutably borrow absolute row `y`.
    ///
    /// # Panics
    /// Panics when `y` is outside [`RowBandMut::rows`].
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let rows = self.rows();
        assert!(
            rows.contains(&y),
            "row {y} is outside band {}..{}",
            rows.start,
            rows.end
        );
        let start = (y - self.first_row) * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Write one sample at absolute coordinates.
    ///
    /// # Panics
    /// Panics when `(x, y)` is outside the band.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        let width = self.width;
        assert!(x < width, "column {x} is outside band width {width}");
        self.row_mut(y)[x] = value;
    }
}

fn sample_count(width: usize, height: usize) -> EdgeResult<usize> {
    width
        .checked_mul(height)
        .ok_or_else(|| EdgeError::validation("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
