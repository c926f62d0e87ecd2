pub(crate) mod partition;
pub(crate) mod pool;
pub(crate) mod sequential;
pub(crate) mod static_threads;
pub(crate) mod task_pool;

use crate::{
    engine::strategy::Strategy,
    foundation::error::{EdgeError, EdgeResult},
    raster::buffer::PixelBuffer,
};

/// Effective (post-clamp) work layout of one execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecStats {
    /// Strategy that produced the output.
    pub strategy: Strategy,
    /// Threads that computed rows.
    pub workers: usize,
    /// Row ranges that were computed.
    pub tasks: usize,
    /// Interior rows written.
    pub rows: usize,
}

impl ExecStats {
    /// Stats of a run that had no interior rows to compute.
    pub fn idle(strategy: Strategy) -> Self {
        Self {
            strategy,
            workers: 0,
            tasks: 0,
            rows: 0,
        }
    }
}

/// One way of applying the Sobel stencil from a source buffer into a destination buffer.
///
/// Implementations write every interior sample of `dst` and never touch the border. `dst` must
/// have the same shape as `src`; the engine passes a zeroed clone of the source.
pub trait Executor: Send + Sync {
    /// The strategy this executor implements.
    fn strategy(&self) -> Strategy;

    /// Fill the interior of `dst` from `src`.
    fn execute(&self, src: &PixelBuffer, dst: &mut PixelBuffer) -> EdgeResult<ExecStats>;
}

/// Create the executor for `strategy`.
///
/// `workers` is ignored by [`Strategy::Sequential`]. `tasks_per_worker` only applies to
/// [`Strategy::TaskPool`].
pub fn create_executor(
    strategy: Strategy,
    workers: usize,
    tasks_per_worker: usize,
) -> EdgeResult<Box<dyn Executor>> {
    match strategy {
        Strategy::Sequential => Ok(Box::new(sequential::SequentialExecutor)),
        Strategy::StaticThreads => Ok(Box::new(static_threads::StaticThreadExecutor::new(
            workers,
        )?)),
        Strategy::TaskPool => Ok(Box::new(task_pool::TaskPoolExecutor::new(
            workers,
            tasks_per_worker,
        )?)),
    }
}

pub(crate) fn ensure_same_shape(src: &PixelBuffer, dst: &PixelBuffer) -> EdgeResult<()> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(EdgeError::validation(format!(
            "destination is {}x{} but source is {}x{}",
            dst.width(),
            dst.height(),
            src.width(),
            src.height()
        )));
    }
    Ok(())
}

/// Rows that contain at least one interior pixel. Zero for images narrower or shorter than 3.
pub(crate) fn stencil_row_count(src: &PixelBuffer) -> usize {
    if src.width() < 3 {
        0
    } else {
        src.interior_row_count()
    }
}
