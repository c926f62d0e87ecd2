/// Convenience result type used across edgeflow.
pub type EdgeResult<T> = Result<T, EdgeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum EdgeError {
    /// The source buffer holds no samples.
    #[error("empty input: source buffer has no samples")]
    EmptyInput,

    /// A sample access fell outside the buffer (or outside the stencil's interior).
    #[error("index out of bounds: ({x}, {y}) in {width}x{height} buffer")]
    IndexOutOfBounds {
        /// Column of the rejected access.
        x: usize,
        /// Row of the rejected access.
        y: usize,
        /// Width of the accessed buffer.
        width: usize,
        /// Height of the accessed buffer.
        height: usize,
    },

    /// Work was submitted to a worker pool after its shutdown began.
    #[error("worker pool is stopped, cannot accept new work")]
    PoolStopped,

    /// A strategy selector did not name any known strategy.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Invalid caller-provided options or buffer data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A worker thread failed while executing a strategy.
    #[error("execution error: {0}")]
    Execution(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EdgeError {
    /// Build an [`EdgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`EdgeError::Execution`] value.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Build an [`EdgeError::UnknownStrategy`] value.
    pub fn unknown_strategy(selector: impl Into<String>) -> Self {
        Self::UnknownStrategy(selector.into())
    }

    pub(crate) fn out_of_bounds(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::IndexOutOfBounds {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
