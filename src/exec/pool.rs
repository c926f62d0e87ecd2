use std::{
    any::Any,
    collections::VecDeque,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, mpsc},
    thread::{self, Scope, ScopedJoinHandle},
};

use anyhow::Context as _;

use crate::foundation::error::{EdgeError, EdgeResult};

type Job<'scope> = Box<dyn FnOnce() + Send + 'scope>;

struct QueueState<'scope> {
    jobs: VecDeque<Job<'scope>>,
    stopped: bool,
}

struct Shared<'scope> {
    state: Mutex<QueueState<'scope>>,
    available: Condvar,
}

impl<'scope> Shared<'scope> {
    // Jobs never run while the lock is held, so a poisoned queue is still consistent.
    fn lock(&self) -> MutexGuard<'_, QueueState<'scope>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fixed-size set of persistent worker threads draining one FIFO queue.
///
/// The pool is bound to a [`std::thread::scope`], so work items may borrow anything that outlives
/// the scope (source buffers, disjoint [`RowBandMut`](crate::RowBandMut) views, counters).
///
/// Lifecycle:
/// - [`WorkerPool::submit`] enqueues an item and wakes one idle worker.
/// - [`WorkerPool::shutdown`] stops intake, wakes every worker, lets them drain the items already
///   queued, and joins them. It is the barrier after which every submitted item has run.
///
/// Dropping a pool that was not shut down performs the same shutdown, ignoring errors.
pub struct WorkerPool<'scope> {
    shared: Arc<Shared<'scope>>,
    workers: Vec<ScopedJoinHandle<'scope, ()>>,
    size: usize,
}

impl<'scope> WorkerPool<'scope> {
    /// Spawn `size` workers inside `scope`.
    pub fn new<'env>(scope: &'scope Scope<'scope, 'env>, size: usize) -> EdgeResult<Self> {
        if size == 0 {
            return Err(EdgeError::validation("worker pool size must be >= 1"));
        }

        let mut pool = Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState {
                    jobs: VecDeque::new(),
                    stopped: false,
                }),
                available: Condvar::new(),
            }),
            workers: Vec::with_capacity(size),
            size,
        };

        for id in 0..size {
            let shared = Arc::clone(&pool.shared);
            // On failure `pool` is dropped, which stops and joins the workers spawned so far.
            let handle = thread::Builder::new()
                .name(format!("edgeflow-pool-{id}"))
                .spawn_scoped(scope, move || worker_loop(&shared, id))
                .with_context(|| format!("spawn pool worker {id}"))?;
            pool.workers.push(handle);
        }

        tracing::debug!(size, "worker pool started");
        Ok(pool)
    }

    /// Number of worker threads the pool was created with.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Items queued but not yet picked up by a worker.
    pub fn pending(&self) -> usize {
        self.shared.lock().jobs.len()
    }

    /// `true` once [`WorkerPool::shutdown`] has begun.
    pub fn is_stopped(&self) -> bool {
        self.shared.lock().stopped
    }

    /// Queue `job` and return a handle to its result.
    ///
    /// Fails with [`EdgeError::PoolStopped`] after shutdown has begun; the job is then dropped
    /// without running.
    pub fn submit<F, T>(&self, job: F) -> EdgeResult<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'scope,
        T: Send + 'scope,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        let wrapped: Job<'scope> = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job)).map_err(panic_message);
            // The caller may have dropped the handle; the result is then discarded.
            let _ = tx.send(outcome);
        });

        {
            let mut state = self.shared.lock();
            if state.stopped {
                return Err(EdgeError::PoolStopped);
            }
            state.jobs.push_back(wrapped);
        }
        self.shared.available.notify_one();
        Ok(TaskHandle { rx })
    }

    /// Stop accepting work, drain the queue, and join every worker.
    ///
    /// Calling it again is a no-op.
    pub fn shutdown(&mut self) -> EdgeResult<()> {
        self.shared.lock().stopped = true;
        self.shared.available.notify_all();

        let mut panicked = 0usize;
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                panicked += 1;
            }
        }
        if panicked > 0 {
            return Err(EdgeError::execution(format!(
                "{panicked} pool worker(s) panicked"
            )));
        }
        tracing::debug!(size = self.size, "worker pool joined");
        Ok(())
    }
}

impl Drop for WorkerPool<'_> {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            let _ = self.shutdown();
        }
    }
}

/// Completion handle for one submitted item.
///
/// Awaiting it is optional: [`WorkerPool::shutdown`] already guarantees the item has run.
#[derive(Debug)]
pub struct TaskHandle<T> {
    rx: mpsc::Receiver<Result<T, String>>,
}

impl<T> TaskHandle<T> {
    /// Block until the item has run and return its value.
    ///
    /// A panic inside the item is reported as [`EdgeError::Execution`].
    pub fn wait(self) -> EdgeResult<T> {
        match self.rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(msg)) => Err(EdgeError::execution(format!("task panicked: {msg}"))),
            Err(_) => Err(EdgeError::execution("task was dropped before it ran")),
        }
    }
}

fn worker_loop(shared: &Shared<'_>, id: usize) {
    loop {
        let job = {
            let mut state = shared.lock();
            loop {
                if let Some(job) = state.jobs.pop_front() {
                    break job;
                }
                if state.stopped {
                    tracing::trace!(worker = id, "pool worker exiting");
                    return;
                }
                state = shared
                    .available
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };
        job();
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/pool.rs"]
mod tests;
