use super::*;
use crate::exec::sequential::SequentialExecutor;

fn noise(width: usize, height: usize, seed: u32) -> PixelBuffer {
    let mut state = seed | 1;
    let samples = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    PixelBuffer::from_raw(width, height, samples).unwrap()
}

fn sequential(src: &PixelBuffer) -> PixelBuffer {
    let mut dst = src.clone_zeroed();
    SequentialExecutor.execute(src, &mut dst).unwrap();
    dst
}

#[test]
fn layout_keeps_requested_counts_when_rows_suffice() {
    let layout = TaskLayout::resolve(100, 4, 2).unwrap();
    assert_eq!(
        layout,
        TaskLayout {
            workers: 4,
            tasks_per_worker: 2,
            tasks: 8
        }
    );
}

#[test]
fn layout_clamps_workers_and_forces_single_task_per_worker() {
    // R=3, N=4, M=2: T would be 8.
    let layout = TaskLayout::resolve(3, 4, 2).unwrap();
    assert_eq!(
        layout,
        TaskLayout {
            workers: 3,
            tasks_per_worker: 1,
            tasks: 3
        }
    );
}

#[test]
fn layout_clamps_tasks_to_rows() {
    let layout = TaskLayout::resolve(5, 2, 4).unwrap();
    assert_eq!(layout.workers, 2);
    assert_eq!(layout.tasks, 5);
    assert_eq!(layout.tasks_per_worker, 1);
}

#[test]
fn layout_rejects_zero_counts() {
    assert!(TaskLayout::resolve(10, 0, 2).is_err());
    assert!(TaskLayout::resolve(10, 2, 0).is_err());
    assert!(TaskPoolExecutor::new(0, 2).is_err());
    assert!(TaskPoolExecutor::new(2, 0).is_err());
}

#[test]
fn three_interior_rows_with_oversized_request_matches_sequential() {
    let src = noise(11, 5, 0xBEEF);
    let mut dst = src.clone_zeroed();
    let stats = TaskPoolExecutor::new(4, 2).unwrap().execute(&src, &mut dst).unwrap();
    assert_eq!(stats.workers, 3);
    assert_eq!(stats.tasks, 3);
    assert_eq!(stats.rows, 3);
    assert_eq!(dst, sequential(&src));
}

#[test]
fn matches_sequential_across_workers_and_multipliers() {
    let src = noise(23, 19, 0x5EED);
    let expected = sequential(&src);
    for n in 1..=8 {
        for m in 1..=4 {
            let mut dst = src.clone_zeroed();
            TaskPoolExecutor::new(n, m)
                .unwrap()
                .execute(&src, &mut dst)
                .unwrap();
            assert_eq!(dst, expected, "workers={n} tasks_per_worker={m}");
        }
    }
}

#[test]
fn tiny_images_submit_nothing() {
    let src = noise(9, 2, 11);
    let mut dst = src.clone_zeroed();
    let stats = TaskPoolExecutor::new(4, 2).unwrap().execute(&src, &mut dst).unwrap();
    assert_eq!(stats, ExecStats::idle(Strategy::TaskPool));
}
