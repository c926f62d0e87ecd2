use std::thread;

use crate::{
    engine::strategy::Strategy,
    exec::{
        ExecStats, Executor, ensure_same_shape, partition::PartitionPlan, pool::WorkerPool,
        stencil_row_count,
    },
    foundation::error::{EdgeError, EdgeResult},
    kernel::sobel::SobelKernel,
    raster::buffer::{PixelBuffer, RowBandMut},
};

/// Worker and task counts after clamping to the available rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskLayout {
    /// Pool threads.
    pub workers: usize,
    /// Effective tasks-per-worker multiplier.
    pub tasks_per_worker: usize,
    /// Row ranges submitted to the pool.
    pub tasks: usize,
}

impl TaskLayout {
    /// Resolve `workers x tasks_per_worker` against `rows` interior rows.
    ///
    /// - fewer rows than workers: one worker per row, multiplier forced to 1;
    /// - more tasks than rows: one task per row, multiplier forced to 1.
    ///
    /// No task ever receives zero rows.
    pub fn resolve(rows: usize, workers: usize, tasks_per_worker: usize) -> EdgeResult<Self> {
        if workers == 0 {
            return Err(EdgeError::validation("task-pool worker count must be >= 1"));
        }
        if tasks_per_worker == 0 {
            return Err(EdgeError::validation("tasks_per_worker must be >= 1"));
        }

        let (mut workers, mut tasks_per_worker) = (workers, tasks_per_worker);
        if rows < workers {
            workers = rows;
            tasks_per_worker = 1;
        }
        let mut tasks = workers.saturating_mul(tasks_per_worker);
        if tasks > rows {
            tasks = rows;
            tasks_per_worker = 1;
        }

        Ok(Self {
            workers,
            tasks_per_worker,
            tasks,
        })
    }
}

/// Persistent worker pool fed with more row ranges than it has workers.
///
/// Each task owns a disjoint [`RowBandMut`] of the destination and writes it directly; there is
/// no lock on the destination. Shutting the pool down is the barrier that makes every write
/// visible before `execute` returns.
#[derive(Clone, Copy, Debug)]
pub struct TaskPoolExecutor {
    workers: usize,
    tasks_per_worker: usize,
}

impl TaskPoolExecutor {
    /// Default tasks-per-worker multiplier.
    pub const DEFAULT_TASKS_PER_WORKER: usize = 2;

    /// Executor with `workers` pool threads and `tasks_per_worker` tasks per thread.
    pub fn new(workers: usize, tasks_per_worker: usize) -> EdgeResult<Self> {
        TaskLayout::resolve(usize::MAX, workers, tasks_per_worker)?;
        Ok(Self {
            workers,
            tasks_per_worker,
        })
    }

    /// Requested (pre-clamp) worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Requested (pre-clamp) multiplier.
    pub fn tasks_per_worker(&self) -> usize {
        self.tasks_per_worker
    }
}

struct RowTask<'a> {
    id: usize,
    src: &'a PixelBuffer,
    band: RowBandMut<'a>,
}

impl RowTask<'_> {
    fn run(mut self) -> usize {
        SobelKernel::apply_band(self.src, &mut self.band);
        let rows = self.band.rows();
        tracing::trace!(task = self.id, start = rows.start, end = rows.end, "task done");
        rows.len()
    }
}

impl Executor for TaskPoolExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::TaskPool
    }

    #[tracing::instrument(
        name = "task_pool",
        skip_all,
        fields(
            width = src.width(),
            height = src.height(),
            requested = self.workers,
            tasks_per_worker = self.tasks_per_worker
        )
    )]
    fn execute(&self, src: &PixelBuffer, dst: &mut PixelBuffer) -> EdgeResult<ExecStats> {
        ensure_same_shape(src, dst)?;
        let rows = stencil_row_count(src);
        let layout = TaskLayout::resolve(rows, self.workers, self.tasks_per_worker)?;
        tracing::debug!(
            workers = layout.workers,
            tasks_per_worker = layout.tasks_per_worker,
            tasks = layout.tasks,
            "task layout"
        );
        if layout.tasks == 0 {
            return Ok(ExecStats::idle(Strategy::TaskPool));
        }

        let plan = PartitionPlan::new(1, rows, layout.tasks)?;
        let bands = dst.bands_mut(&plan)?;

        let written = thread::scope(|scope| -> EdgeResult<usize> {
            let mut pool = WorkerPool::new(scope, layout.workers)?;
            let mut handles = Vec::with_capacity(bands.len());
            for (id, band) in bands.into_iter().enumerate() {
                let task = RowTask { id, src, band };
                handles.push(pool.submit(move || task.run())?);
            }
            pool.shutdown()?;

            let mut written = 0usize;
            for handle in handles {
                written += handle.wait()?;
            }
            Ok(written)
        })?;

        if written != rows {
            return Err(EdgeError::execution(format!(
                "task pool wrote {written} of {rows} interior rows"
            )));
        }

        Ok(ExecStats {
            strategy: Strategy::TaskPool,
            workers: layout.workers,
            tasks: layout.tasks,
            rows,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/task_pool.rs"]
mod tests;
