/*!
 * Heap Allocator Tests
 * Atomic failures, no coalescing, deallocation policies and reporting
 */

use heap_sim::memory::{
    Allocator, FreeExtent, FreePolicy, HeapAllocator, HeapError, HeapInfo, HeapPressure, Strategy,
};
use heap_sim::core::limits::MAX_CAPACITY;
use heap_sim::report::render_text;
use pretty_assertions::assert_eq;

#[test]
fn test_initial_state() {
    let heap = HeapAllocator::new(40, Strategy::BestFit).unwrap();
    assert_eq!(heap.capacity(), 40);
    assert_eq!(heap.strategy(), Strategy::BestFit);
    assert_eq!(heap.free_policy(), FreePolicy::Strict);
    assert_eq!(heap.free_extents(), &[FreeExtent::new(0, 40)]);
    assert!(heap.allocated().is_empty());
    assert_eq!(heap.cursor(), 0);
    assert_eq!(heap.used(), 0);
}

#[test]
fn test_zero_capacity_rejected() {
    assert_eq!(
        HeapAllocator::new(0, Strategy::FirstFit),
        Err(HeapError::InvalidCapacity(0))
    );
}

#[test]
fn test_capacity_limit() {
    let heap = HeapAllocator::new(MAX_CAPACITY, Strategy::FirstFit).unwrap();
    assert_eq!(heap.free_extents(), &[FreeExtent::new(0, MAX_CAPACITY)]);
    assert_eq!(
        HeapAllocator::new(MAX_CAPACITY + 1, Strategy::FirstFit),
        Err(HeapError::InvalidCapacity(MAX_CAPACITY + 1))
    );
}

#[test]
fn test_failed_allocation_leaves_state_untouched() {
    for strategy in Strategy::ALL {
        let mut heap = HeapAllocator::new(20, Strategy::FirstFit).unwrap();
        heap.allocate(6).unwrap();
        heap.allocate(6).unwrap();
        heap.deallocate(0, 6).unwrap();
        heap.set_strategy(strategy);
        if strategy == Strategy::NextFit {
            heap.allocate(1).unwrap();
        }

        let before = heap.clone();
        let expected_largest = before.stats().largest_free_extent;
        let result = heap.allocate(9);

        match result {
            Err(HeapError::InsufficientSpace {
                requested,
                largest_free,
            }) => {
                assert_eq!(requested, 9);
                assert_eq!(largest_free, expected_largest);
            }
            other => panic!("Expected InsufficientSpace, got {:?}", other),
        }
        assert_eq!(heap, before);
    }
}

#[test]
fn test_adjacent_frees_are_not_coalesced() {
    let mut heap = HeapAllocator::new(12, Strategy::FirstFit).unwrap();
    heap.allocate(4).unwrap();
    heap.allocate(4).unwrap();
    heap.allocate(4).unwrap();
    assert!(heap.free_extents().is_empty());

    heap.deallocate(0, 4).unwrap();
    assert_eq!(heap.free_extents().len(), 1);
    heap.deallocate(4, 4).unwrap();
    assert_eq!(heap.free_extents().len(), 2);

    assert_eq!(
        heap.free_extents(),
        &[FreeExtent::new(0, 4), FreeExtent::new(4, 4)]
    );

    // Eight contiguous free cells, but no single extent can hold them
    assert!(matches!(
        heap.allocate(8),
        Err(HeapError::InsufficientSpace { largest_free: 4, .. })
    ));
}

#[test]
fn test_free_removes_first_matching_block_in_order() {
    let mut heap = HeapAllocator::new(10, Strategy::FirstFit).unwrap();
    heap.allocate(2).unwrap();
    heap.allocate(3).unwrap();
    heap.allocate(1).unwrap();

    heap.deallocate(2, 3).unwrap();
    let starts: Vec<_> = heap.allocated().iter().map(|b| b.start).collect();
    assert_eq!(starts, vec![0, 5]);
}

#[test]
fn test_trusting_policy_reproduces_unchecked_free() {
    let mut heap = HeapAllocator::new(10, Strategy::FirstFit)
        .unwrap()
        .with_free_policy(FreePolicy::Trusting);
    heap.allocate(5).unwrap();

    // Start 1 is inside a block but no block starts there
    heap.deallocate(1, 2).unwrap();
    assert_eq!(heap.allocated().len(), 1);
    assert_eq!(
        heap.free_extents(),
        &[FreeExtent::new(5, 5), FreeExtent::new(1, 2)]
    );
    assert!(heap.is_occupied(0));
    assert!(!heap.is_occupied(1));
    assert!(!heap.is_occupied(2));
    assert!(heap.is_occupied(3));
    assert!(heap.check_invariants().is_err());
}

#[test]
fn test_trusting_policy_still_rejects_out_of_range() {
    let mut heap = HeapAllocator::new(10, Strategy::FirstFit)
        .unwrap()
        .with_free_policy(FreePolicy::Trusting);
    assert!(matches!(
        heap.deallocate(8, 4),
        Err(HeapError::OutOfBounds { .. })
    ));
    assert!(matches!(
        heap.deallocate(usize::MAX, 2),
        Err(HeapError::OutOfBounds { .. })
    ));
}

#[test]
fn test_strict_policy_rejects_without_mutation() {
    let mut heap = HeapAllocator::new(10, Strategy::FirstFit).unwrap();
    heap.allocate(5).unwrap();
    let before = heap.clone();

    assert_eq!(heap.deallocate(7, 1), Err(HeapError::UnknownAllocation(7)));
    assert!(matches!(
        heap.deallocate(0, 3),
        Err(HeapError::ExtentMismatch { recorded: 5, .. })
    ));
    assert_eq!(heap, before);
}

#[test]
fn test_double_free_rejected_under_strict_policy() {
    let mut heap = HeapAllocator::new(10, Strategy::FirstFit).unwrap();
    let block = heap.allocate(5).unwrap();
    heap.deallocate(block.start, block.len()).unwrap();
    assert_eq!(
        heap.deallocate(block.start, block.len()),
        Err(HeapError::UnknownAllocation(0))
    );
}

#[test]
fn test_report_is_idempotent() {
    let mut heap = HeapAllocator::new(16, Strategy::WorstFit).unwrap();
    heap.allocate(3).unwrap();
    heap.allocate(2).unwrap();
    heap.deallocate(0, 3).unwrap();

    let first = heap.report();
    let second = heap.report();
    assert_eq!(first, second);
    assert_eq!(render_text(&first), render_text(&second));
}

#[test]
fn test_report_lists_blocks_in_allocation_order() {
    let mut heap = HeapAllocator::new(40, Strategy::BestFit).unwrap();
    heap.allocate(5).unwrap();
    heap.allocate(3).unwrap();
    heap.deallocate(5, 3).unwrap();
    heap.set_strategy(Strategy::NextFit);
    heap.allocate(8).unwrap();

    let text = render_text(&heap.report());
    let occupancy: String = "[X]".repeat(5) + &"[ ]".repeat(3) + &"[X]".repeat(8) + &"[ ]".repeat(24);
    assert!(text.contains(&occupancy));
    assert!(text.contains("Block 1: start = 0, end = 4\nBlock 2: start = 8, end = 15\n"));
    assert!(!text.contains("Block 3"));
}

#[test]
fn test_independent_instances() {
    let mut a = HeapAllocator::new(10, Strategy::FirstFit).unwrap();
    let b = HeapAllocator::new(10, Strategy::FirstFit).unwrap();
    a.allocate(7).unwrap();
    assert_eq!(b.used(), 0);
    assert_eq!(b.free_extents(), &[FreeExtent::new(0, 10)]);
}

#[test]
fn test_pressure_through_trait() {
    let mut heap = HeapAllocator::new(10, Strategy::FirstFit).unwrap();
    assert_eq!(HeapInfo::pressure(&heap), HeapPressure::Low);
    Allocator::allocate(&mut heap, 9).unwrap();
    assert_eq!(HeapInfo::pressure(&heap), HeapPressure::High);
    Allocator::allocate(&mut heap, 1).unwrap();
    assert_eq!(HeapInfo::pressure(&heap), HeapPressure::Critical);
}
