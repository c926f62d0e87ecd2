use crate::{
    foundation::error::{EdgeError, EdgeResult},
    raster::buffer::{PixelBuffer, RowBandMut},
};

/// The 3x3 Sobel stencil: `clamp(|gx| + |gy|, 0, 255)`.
///
/// This is the single correctness oracle: every execution strategy must produce exactly the values
/// returned by [`SobelKernel::compute`].
pub struct SobelKernel;

impl SobelKernel {
    /// Horizontal-gradient weights, indexed `[dy + 1][dx + 1]`.
    pub const GX: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
    /// Vertical-gradient weights, indexed `[dy + 1][dx + 1]`.
    pub const GY: [[i32; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

    /// Gradient magnitude at the interior pixel `(x, y)`.
    ///
    /// # Panics
    /// Panics when `(x, y)` is not an interior pixel (`1 <= x <= width - 2`,
    /// `1 <= y <= height - 2`).
    pub fn compute(src: &PixelBuffer, x: usize, y: usize) -> u8 {
        assert!(
            is_interior(src, x, y),
            "{}",
            EdgeError::out_of_bounds(x, y, src.width(), src.height())
        );
        Self::stencil([src.row(y - 1), src.row(y), src.row(y + 1)], x)
    }

    /// Like [`SobelKernel::compute`], but reports non-interior coordinates as
    /// [`EdgeError::IndexOutOfBounds`].
    pub fn try_compute(src: &PixelBuffer, x: usize, y: usize) -> EdgeResult<u8> {
        if !is_interior(src, x, y) {
            return Err(EdgeError::out_of_bounds(x, y, src.width(), src.height()));
        }
        Ok(Self::stencil(
            [src.row(y - 1), src.row(y), src.row(y + 1)],
            x,
        ))
    }

    /// Fill the interior columns of `out` (one full-width row) with the stencil for row `y`.
    /// Border columns are left untouched.
    pub(crate) fn compute_row(src: &PixelBuffer, y: usize, out: &mut [u8]) {
        let rows = [src.row(y - 1), src.row(y), src.row(y + 1)];
        for x in 1..src.width().saturating_sub(1) {
            out[x] = Self::stencil(rows, x);
        }
    }

    /// Run the stencil over every row of `band`.
    pub(crate) fn apply_band(src: &PixelBuffer, band: &mut RowBandMut<'_>) {
        for y in band.rows() {
            Self::compute_row(src, y, band.row_mut(y));
        }
    }

    fn stencil(rows: [&[u8]; 3], x: usize) -> u8 {
        let mut gx = 0i32;
        let mut gy = 0i32;
        for (ky, row) in rows.iter().enumerate() {
            for kx in 0..3 {
                let v = i32::from(row[x + kx - 1]);
                gx += Self::GX[ky][kx] * v;
                gy += Self::GY[ky][kx] * v;
            }
        }
        (gx.abs() + gy.abs()).clamp(0, 255) as u8
    }
}

fn is_interior(src: &PixelBuffer, x: usize, y: usize) -> bool {
    x >= 1 && y >= 1 && x + 1 < src.width() && y + 1 < src.height()
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/sobel.rs"]
mod tests;
