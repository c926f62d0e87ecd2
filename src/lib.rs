//! edgeflow computes Sobel edge intensity over single-channel 8-bit images.
//!
//! The interesting part is not the stencil but how the work is spread over threads. Three
//! strategies share one contract: identical output to the sequential baseline, zero border, no
//! state surviving a call.
//!
//! - [`Strategy::Sequential`]: one thread walks every interior row.
//! - [`Strategy::StaticThreads`]: N short-lived threads each compute a contiguous row range into a
//!   private buffer, then copy it into the destination under a shared lock.
//! - [`Strategy::TaskPool`]: a [`WorkerPool`] of N persistent threads drains N×M row-range tasks,
//!   each writing straight into its own disjoint [`RowBandMut`] of the destination.
//!
//! Row ranges come from a [`PartitionPlan`]: contiguous, non-empty, remainder rows first, and never
//! more ranges than rows.
//!
//! # Example
//!
//! ```
//! use edgeflow::{EdgeDetectionEngine, PixelBuffer, Strategy};
//!
//! let mut src = PixelBuffer::new(5, 5).unwrap();
//! src.set(2, 2, 255);
//!
//! let engine = EdgeDetectionEngine::default();
//! let edges = engine.process_image(&src, Strategy::TaskPool, 4).unwrap();
//! assert_eq!(edges.get(1, 1), 255);
//! assert_eq!(edges.get(0, 0), 0);
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod exec;
mod foundation;
mod kernel;
mod raster;

pub use engine::pipeline::{EdgeDetectionEngine, EngineOpts, detect_edges};
pub use engine::strategy::Strategy;
pub use exec::partition::{PartitionPlan, RowRange};
pub use exec::pool::{TaskHandle, WorkerPool};
pub use exec::sequential::SequentialExecutor;
pub use exec::static_threads::StaticThreadExecutor;
pub use exec::task_pool::{TaskLayout, TaskPoolExecutor};
pub use exec::{ExecStats, Executor, create_executor};
pub use foundation::error::{EdgeError, EdgeResult};
pub use kernel::sobel::SobelKernel;
pub use raster::buffer::{PixelBuffer, RowBandMut};
