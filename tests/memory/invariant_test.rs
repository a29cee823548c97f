/*!
 * Property Tests
 * Partition, atomicity and no-coalescing properties over random operation sequences
 */

use heap_sim::memory::{HeapAllocator, HeapError, Strategy as Placement};
use proptest::prelude::*;

const CAPACITY: usize = 64;

#[derive(Debug, Clone)]
enum Action {
    Allocate(usize),
    /// Free the n-th live block (modulo the live count)
    Free(usize),
    Switch(Placement),
}

fn placement() -> impl Strategy<Value = Placement> {
    prop_oneof![
        Just(Placement::FirstFit),
        Just(Placement::BestFit),
        Just(Placement::WorstFit),
        Just(Placement::NextFit),
    ]
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (1usize..=20).prop_map(Action::Allocate),
        3 => any::<usize>().prop_map(Action::Free),
        1 => placement().prop_map(Action::Switch),
    ]
}

proptest! {
    #[test]
    fn prop_extents_partition_arena(
        initial in placement(),
        actions in prop::collection::vec(action(), 1..80),
    ) {
        let mut heap = HeapAllocator::new(CAPACITY, initial).unwrap();

        for action in actions {
            match action {
                Action::Allocate(size) => {
                    let before = heap.clone();
                    match heap.allocate(size) {
                        Ok(block) => {
                            prop_assert_eq!(block.len(), size);
                            prop_assert_eq!(heap.used(), before.used() + size);
                        }
                        Err(HeapError::InsufficientSpace { .. }) => {
                            prop_assert_eq!(&heap, &before);
                        }
                        Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                    }
                }
                Action::Free(n) => {
                    if heap.allocated().is_empty() {
                        continue;
                    }
                    let block = heap.allocated()[n % heap.allocated().len()];
                    let free_before = heap.free_extents().len();
                    heap.deallocate(block.start, block.len()).unwrap();
                    prop_assert_eq!(heap.free_extents().len(), free_before + 1);
                }
                Action::Switch(strategy) => heap.set_strategy(strategy),
            }

            prop_assert!(heap.check_invariants().is_ok(), "{:?}", heap.check_invariants());
        }
    }

    #[test]
    fn prop_report_reflects_arena(
        sizes in prop::collection::vec(1usize..=10, 1..12),
    ) {
        let mut heap = HeapAllocator::new(CAPACITY, Placement::FirstFit).unwrap();
        for size in sizes {
            let _ = heap.allocate(size);
        }

        let report = heap.report();
        prop_assert_eq!(report.cells.len(), CAPACITY);
        prop_assert_eq!(report.cells.iter().filter(|&&c| c).count(), heap.used());
        for (i, entry) in report.blocks.iter().enumerate() {
            prop_assert_eq!(entry.ordinal, i + 1);
            prop_assert!(report.cells[entry.start..=entry.end].iter().all(|&c| c));
        }
    }
}
