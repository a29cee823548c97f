/*!
 * Shared Heap Tests
 * Concurrent callers behind one mutex
 */

use heap_sim::memory::{Allocator, HeapAllocator, HeapInfo, SharedHeap, Strategy};
use std::thread;

#[test]
fn test_concurrent_allocations_do_not_overlap() {
    let shared = SharedHeap::new(HeapAllocator::new(400, Strategy::FirstFit).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let mut heap = shared.clone();
            thread::spawn(move || {
                (0..10)
                    .map(|_| heap.allocate(5).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut blocks: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    blocks.sort_by_key(|b| b.start);

    assert_eq!(blocks.len(), 80);
    for pair in blocks.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }

    let snapshot = shared.snapshot();
    assert!(snapshot.check_invariants().is_ok());
    assert_eq!(shared.stats().used_cells, 400);
}

#[test]
fn test_clones_share_state() {
    let shared: SharedHeap = HeapAllocator::new(10, Strategy::BestFit).unwrap().into();
    let mut other = shared.clone();

    other.set_strategy(Strategy::WorstFit);
    other.allocate(4).unwrap();

    assert_eq!(shared.strategy(), Strategy::WorstFit);
    assert_eq!(shared.report().blocks.len(), 1);
    assert_eq!(shared.with(|heap| heap.free_extents().len()), 1);
}
