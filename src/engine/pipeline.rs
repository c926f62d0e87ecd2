use crate::{
    engine::strategy::Strategy,
    exec::{ExecStats, create_executor, task_pool::TaskPoolExecutor},
    foundation::error::{EdgeError, EdgeResult},
    raster::buffer::PixelBuffer,
};

/// Engine-wide options.
///
/// Deserializes with defaults for missing fields, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Task-pool strategy: tasks submitted per pool worker (before clamping).
    pub tasks_per_worker: usize,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            tasks_per_worker: TaskPoolExecutor::DEFAULT_TASKS_PER_WORKER,
        }
    }
}

impl EngineOpts {
    /// Reject option values no strategy can run with.
    pub fn validate(&self) -> EdgeResult<()> {
        if self.tasks_per_worker == 0 {
            return Err(EdgeError::validation(
                "engine option 'tasks_per_worker' must be >= 1",
            ));
        }
        Ok(())
    }
}

/// Facade that turns a source intensity buffer into its Sobel edge map.
///
/// Every call is self-contained: threads and pools are created for the call and joined before it
/// returns.
#[derive(Clone, Debug, Default)]
pub struct EdgeDetectionEngine {
    opts: EngineOpts,
}

impl EdgeDetectionEngine {
    /// Create an engine with validated options.
    pub fn new(opts: EngineOpts) -> EdgeResult<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Options this engine was built with.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Run `strategy` with `workers` threads and return the edge map.
    ///
    /// The result has the shape of `src`, a zero border, and interior samples equal to
    /// [`SobelKernel::compute`](crate::SobelKernel::compute) regardless of strategy.
    ///
    /// Fails with [`EdgeError::EmptyInput`] when `src` has no samples.
    pub fn process_image(
        &self,
        src: &PixelBuffer,
        strategy: Strategy,
        workers: usize,
    ) -> EdgeResult<PixelBuffer> {
        self.process_image_with_stats(src, strategy, workers)
            .map(|(dst, _)| dst)
    }

    /// Like [`EdgeDetectionEngine::process_image`], with a raw numeric strategy id.
    ///
    /// Unrecognized ids fail with [`EdgeError::UnknownStrategy`].
    pub fn process_image_by_id(
        &self,
        src: &PixelBuffer,
        strategy_id: u32,
        workers: usize,
    ) -> EdgeResult<PixelBuffer> {
        let strategy = Strategy::try_from(strategy_id)?;
        self.process_image(src, strategy, workers)
    }

    /// Run `strategy` and also return the effective worker/task layout.
    #[tracing::instrument(skip(self, src), fields(width = src.width(), height = src.height()))]
    pub fn process_image_with_stats(
        &self,
        src: &PixelBuffer,
        strategy: Strategy,
        workers: usize,
    ) -> EdgeResult<(PixelBuffer, ExecStats)> {
        if src.is_empty() {
            tracing::warn!("source buffer has no samples");
            return Err(EdgeError::EmptyInput);
        }

        let executor = create_executor(strategy, workers, self.opts.tasks_per_worker)?;
        let mut dst = src.clone_zeroed();
        let stats = executor.execute(src, &mut dst)?;
        tracing::debug!(
            workers = stats.workers,
            tasks = stats.tasks,
            rows = stats.rows,
            "edge map ready"
        );
        Ok((dst, stats))
    }
}

/// Run `strategy` with default engine options.
///
/// This is a convenience wrapper around [`EdgeDetectionEngine::process_image`].
pub fn detect_edges(
    src: &PixelBuffer,
    strategy: Strategy,
    workers: usize,
) -> EdgeResult<PixelBuffer> {
    EdgeDetectionEngine::default().process_image(src, strategy, workers)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/pipeline.rs"]
mod tests;
