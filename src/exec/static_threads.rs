use std::{sync::Mutex, thread};

use anyhow::Context as _;

use crate::{
    engine::strategy::Strategy,
    exec::{ExecStats, Executor, ensure_same_shape, partition::PartitionPlan, stencil_row_count},
    foundation::error::{EdgeError, EdgeResult},
    kernel::sobel::SobelKernel,
    raster::buffer::PixelBuffer,
};

/// One short-lived thread per row range, each merging its rows into the destination under a
/// shared lock.
///
/// Workers compute into a private buffer first, so the lock is only held for the copy. The
/// requested worker count is clamped to the number of interior rows.
#[derive(Clone, Copy, Debug)]
pub struct StaticThreadExecutor {
    workers: usize,
}

impl StaticThreadExecutor {
    /// Executor that splits the interior into at most `workers` ranges.
    pub fn new(workers: usize) -> EdgeResult<Self> {
        if workers == 0 {
            return Err(EdgeError::validation("static-threads worker count must be >= 1"));
        }
        Ok(Self { workers })
    }

    /// Requested (pre-clamp) worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Executor for StaticThreadExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::StaticThreads
    }

    #[tracing::instrument(
        name = "static_threads",
        skip_all,
        fields(width = src.width(), height = src.height(), requested = self.workers)
    )]
    fn execute(&self, src: &PixelBuffer, dst: &mut PixelBuffer) -> EdgeResult<ExecStats> {
        ensure_same_shape(src, dst)?;
        let rows = stencil_row_count(src);
        let plan = PartitionPlan::new(1, rows, self.workers)?;
        tracing::debug!(
            workers = plan.len(),
            rows_per_worker = plan.base_rows(),
            rest_rows = plan.extra_rows(),
            "static partition"
        );
        if plan.is_empty() {
            return Ok(ExecStats::idle(Strategy::StaticThreads));
        }

        let width = src.width();
        let shared_dst = Mutex::new(dst);

        thread::scope(|scope| -> EdgeResult<()> {
            let mut handles = Vec::with_capacity(plan.len());
            for (id, &range) in plan.ranges().iter().enumerate() {
                let shared_dst = &shared_dst;
                let handle = thread::Builder::new()
                    .name(format!("edgeflow-static-{id}"))
                    .spawn_scoped(scope, move || -> EdgeResult<()> {
                        let mut local = vec![0u8; range.len() * width];
                        for (y, out) in range.as_range().zip(local.chunks_exact_mut(width)) {
                            SobelKernel::compute_row(src, y, out);
                        }

                        let mut guard = shared_dst
                            .lock()
                            .map_err(|_| EdgeError::execution("destination lock poisoned"))?;
                        let mut band = guard.rows_mut(range)?;
                        for (y, row) in range.as_range().zip(local.chunks_exact(width)) {
                            band.row_mut(y)[1..width - 1].copy_from_slice(&row[1..width - 1]);
                        }
                        drop(guard);

                        tracing::trace!(worker = id, start = range.start, end = range.end, "merged");
                        Ok(())
                    })
                    .with_context(|| format!("spawn static worker {id}"))?;
                handles.push(handle);
            }

            for handle in handles {
                handle
                    .join()
                    .map_err(|_| EdgeError::execution("static worker panicked"))??;
            }
            Ok(())
        })?;

        Ok(ExecStats {
            strategy: Strategy::StaticThreads,
            workers: plan.len(),
            tasks: plan.len(),
            rows,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/static_threads.rs"]
mod tests;
