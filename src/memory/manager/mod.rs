/*!
 * Heap Manager
 *
 * Fixed-capacity heap simulator with pluggable placement strategies.
 *
 * ## Bookkeeping
 *
 * - **Arena**: one occupancy flag per cell
 * - **Free list**: extents in creation order, never sorted and never merged
 * - **Allocated list**: blocks in allocation order, looked up linearly by start
 *
 * ## Strategies
 *
 * - **First fit**: first extent in list order that fits
 * - **Best fit**: smallest extent that fits, earliest on ties
 * - **Worst fit**: largest extent that fits, earliest on ties
 * - **Next fit**: first fit, resuming after the last consumed extent
 *
 * Released blocks are appended to the free list as new extents. Adjacent free
 * extents are never coalesced, so fragmentation accumulates over the heap's
 * lifetime.
 */

mod allocator;
mod arena;
mod free_list;
mod invariants;
mod stats;

pub use free_list::FreeList;

use super::traits::{Allocator, HeapInfo};
use super::types::{AllocatedExtent, FreeExtent, FreePolicy, HeapError, HeapResult, HeapStats, Strategy};
use crate::config::HeapConfig;
use crate::core::limits::MAX_CAPACITY;
use crate::core::types::{Address, Size};
use crate::report::HeapReport;
use arena::Arena;
use tracing::info;

/// Heap allocator state.
///
/// Owned by the caller and passed by `&mut` to every mutating operation;
/// independent instances never share state.
#[derive(Debug, Clone, PartialEq)]
pub struct HeapAllocator {
    arena: Arena,
    free_list: FreeList,
    allocated: Vec<AllocatedExtent>,
    strategy: Strategy,
    free_policy: FreePolicy,
    used: Size,
}

impl HeapAllocator {
    /// Create a heap of `capacity` free cells, at most `MAX_CAPACITY`
    pub fn new(capacity: Size, strategy: Strategy) -> HeapResult<Self> {
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(HeapError::InvalidCapacity(capacity));
        }

        info!(capacity, strategy = %strategy, "Heap initialized");
        Ok(Self {
            arena: Arena::new(capacity),
            free_list: FreeList::new(capacity),
            allocated: Vec::new(),
            strategy,
            free_policy: FreePolicy::default(),
            used: 0,
        })
    }

    /// Create a heap from loaded configuration
    pub fn from_config(config: &HeapConfig) -> HeapResult<Self> {
        Ok(Self::new(config.capacity, config.strategy)?.with_free_policy(config.free_policy))
    }

    pub fn with_free_policy(mut self, policy: FreePolicy) -> Self {
        self.free_policy = policy;
        self
    }

    pub fn capacity(&self) -> Size {
        self.arena.capacity()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn free_policy(&self) -> FreePolicy {
        self.free_policy
    }

    /// Free extents in list order
    pub fn free_extents(&self) -> &[FreeExtent] {
        self.free_list.as_slice()
    }

    /// Allocated blocks in allocation order
    pub fn allocated(&self) -> &[AllocatedExtent] {
        &self.allocated
    }

    /// Next-fit resume position in the free list
    pub fn cursor(&self) -> usize {
        self.free_list.cursor()
    }

    /// Cells currently marked occupied
    pub fn used(&self) -> Size {
        self.used
    }

    pub fn is_occupied(&self, cell: Address) -> bool {
        self.arena.is_occupied(cell)
    }
}

// Implement trait interfaces
impl Allocator for HeapAllocator {
    fn allocate(&mut self, size: Size) -> HeapResult<AllocatedExtent> {
        HeapAllocator::allocate(self, size)
    }

    fn deallocate(&mut self, start: Address, length: Size) -> HeapResult<()> {
        HeapAllocator::deallocate(self, start, length)
    }

    fn set_strategy(&mut self, strategy: Strategy) {
        HeapAllocator::set_strategy(self, strategy)
    }

    fn strategy(&self) -> Strategy {
        HeapAllocator::strategy(self)
    }
}

impl HeapInfo for HeapAllocator {
    fn capacity(&self) -> Size {
        HeapAllocator::capacity(self)
    }

    fn stats(&self) -> HeapStats {
        HeapAllocator::stats(self)
    }

    fn report(&self) -> HeapReport {
        HeapAllocator::report(self)
    }
}
