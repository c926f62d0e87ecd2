use crate::{
    engine::strategy::Strategy,
    exec::{ExecStats, Executor, ensure_same_shape, partition::RowRange, stencil_row_count},
    foundation::error::EdgeResult,
    kernel::sobel::SobelKernel,
    raster::buffer::PixelBuffer,
};

/// Single-threaded baseline. Its output is the reference every other strategy must reproduce.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::Sequential
    }

    #[tracing::instrument(name = "sequential", skip_all, fields(width = src.width(), height = src.height()))]
    fn execute(&self, src: &PixelBuffer, dst: &mut PixelBuffer) -> EdgeResult<ExecStats> {
        ensure_same_shape(src, dst)?;
        let rows = stencil_row_count(src);
        if rows == 0 {
            return Ok(ExecStats::idle(Strategy::Sequential));
        }

        let mut band = dst.rows_mut(RowRange::new(1, 1 + rows))?;
        SobelKernel::apply_band(src, &mut band);

        Ok(ExecStats {
            strategy: Strategy::Sequential,
            workers: 1,
            tasks: 1,
            rows,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/sequential.rs"]
mod tests;
