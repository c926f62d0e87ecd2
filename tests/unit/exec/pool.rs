use super::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[test]
fn every_submitted_item_runs_exactly_once_before_shutdown_returns() {
    const K: usize = 200;
    let counts: Vec<AtomicUsize> = (0..K).map(|_| AtomicUsize::new(0)).collect();

    thread::scope(|scope| {
        let mut pool = WorkerPool::new(scope, 4).unwrap();
        for i in 0..K {
            let counts = &counts;
            pool.submit(move || {
                counts[i].fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
        pool.shutdown().unwrap();

        assert!(counts.iter().all(|c| c.load(Ordering::SeqCst) == 1));
    });
}

#[test]
fn shutdown_drains_items_queued_behind_a_busy_worker() {
    let done = AtomicUsize::new(0);

    thread::scope(|scope| {
        let mut pool = WorkerPool::new(scope, 1).unwrap();
        let done = &done;
        pool.submit(move || {
            thread::sleep(Duration::from_millis(20));
            done.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        for _ in 0..10 {
            pool.submit(move || {
                done.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
        pool.shutdown().unwrap();
        assert_eq!(done.load(Ordering::SeqCst), 11);
        assert_eq!(pool.pending(), 0);
    });
}

#[test]
fn single_worker_runs_items_in_fifo_order() {
    let order = Mutex::new(Vec::new());

    thread::scope(|scope| {
        let mut pool = WorkerPool::new(scope, 1).unwrap();
        for i in 0..16 {
            let order = &order;
            pool.submit(move || order.lock().unwrap().push(i)).unwrap();
        }
        pool.shutdown().unwrap();
    });

    assert_eq!(order.into_inner().unwrap(), (0..16).collect::<Vec<_>>());
}

#[test]
fn submit_after_shutdown_fails_and_never_runs() {
    let ran = AtomicBool::new(false);

    thread::scope(|scope| {
        let mut pool = WorkerPool::new(scope, 2).unwrap();
        pool.shutdown().unwrap();
        assert!(pool.is_stopped());

        let ran = &ran;
        let err = pool
            .submit(move || ran.store(true, Ordering::SeqCst))
            .unwrap_err();
        assert!(matches!(err, EdgeError::PoolStopped));

        // A second shutdown is a no-op.
        pool.shutdown().unwrap();
    });

    assert!(!ran.load(Ordering::SeqCst));
}

#[test]
fn handles_return_values() {
    thread::scope(|scope| {
        let pool = WorkerPool::new(scope, 3).unwrap();
        let handles: Vec<_> = (0..8u64)
            .map(|i| pool.submit(move || i * i).unwrap())
            .collect();
        let values: Vec<u64> = handles.into_iter().map(|h| h.wait().unwrap()).collect();
        assert_eq!(values, vec![0, 1, 4, 9, 16, 25, 36, 49]);
        assert_eq!(pool.size(), 3);
    });
}

#[test]
fn panicking_item_is_reported_and_worker_survives() {
    thread::scope(|scope| {
        let mut pool = WorkerPool::new(scope, 1).unwrap();
        let bad = pool.submit(|| -> u32 { panic!("bad row") }).unwrap();
        let good = pool.submit(|| 7u32).unwrap();
        pool.shutdown().unwrap();

        let err = bad.wait().unwrap_err();
        assert!(err.to_string().contains("bad row"));
        assert_eq!(good.wait().unwrap(), 7);
    });
}

#[test]
fn dropping_pool_joins_workers() {
    let done = AtomicUsize::new(0);
    thread::scope(|scope| {
        let pool = WorkerPool::new(scope, 2).unwrap();
        for _ in 0..5 {
            let done = &done;
            pool.submit(move || {
                done.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
        drop(pool);
        assert_eq!(done.load(Ordering::SeqCst), 5);
    });
}

#[test]
fn zero_workers_is_rejected() {
    thread::scope(|scope| {
        assert!(matches!(
            WorkerPool::new(scope, 0),
            Err(EdgeError::Validation(_))
        ));
    });
}
