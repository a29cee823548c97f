/*!
 * Memory Traits
 * Heap allocator abstractions
 */

use super::types::*;
use crate::core::types::{Address, Size};
use crate::report::HeapReport;

/// Heap allocator interface
pub trait Allocator {
    /// Allocate `size` cells under the active strategy
    fn allocate(&mut self, size: Size) -> HeapResult<AllocatedExtent>;

    /// Release `length` cells starting at `start`
    fn deallocate(&mut self, start: Address, length: Size) -> HeapResult<()>;

    /// Replace the placement strategy used by the next allocation
    fn set_strategy(&mut self, strategy: Strategy);

    /// Currently active placement strategy
    fn strategy(&self) -> Strategy;
}

/// Heap state provider
pub trait HeapInfo {
    /// Arena size in cells
    fn capacity(&self) -> Size;

    /// Usage and fragmentation statistics
    fn stats(&self) -> HeapStats;

    /// Snapshot of occupancy and allocated blocks for rendering
    fn report(&self) -> HeapReport;

    /// Get heap pressure level
    fn pressure(&self) -> HeapPressure {
        self.stats().pressure()
    }
}
