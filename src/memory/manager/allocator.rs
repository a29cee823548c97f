/*!
 * Heap Allocator Implementation
 * Allocation, deallocation and strategy switching
 */

use super::HeapAllocator;
use crate::core::types::{Address, Size};
use crate::memory::types::{
    AllocatedExtent, FreeExtent, FreePolicy, HeapError, HeapPressure, HeapResult, Strategy,
};
use tracing::{debug, info, warn};

impl HeapAllocator {
    /// Index of the free extent the active strategy would consume for `size`
    pub fn select_free_extent(&self, size: Size) -> Option<usize> {
        self.free_list.select(self.strategy, size)
    }

    /// Allocate `size` contiguous cells.
    ///
    /// Either the arena, both lists and the cursor are all updated, or nothing
    /// changes and an error is returned.
    pub fn allocate(&mut self, size: Size) -> HeapResult<AllocatedExtent> {
        if size == 0 {
            warn!("Rejected zero-sized allocation");
            return Err(HeapError::InvalidSize(size));
        }

        let Some(index) = self.select_free_extent(size) else {
            let largest_free = self.free_list.largest();
            warn!(
                requested = size,
                largest_free,
                free_extents = self.free_list.len(),
                strategy = %self.strategy,
                "Allocation failed: no free extent large enough"
            );
            return Err(HeapError::InsufficientSpace {
                requested: size,
                largest_free,
            });
        };

        debug!(
            index,
            extent_start = self.free_list.as_slice()[index].start,
            extent_length = self.free_list.as_slice()[index].length,
            strategy = %self.strategy,
            "Selected free extent"
        );

        let advance = self.strategy == Strategy::NextFit;
        let start = self.free_list.consume(index, size, advance);
        self.used += self.arena.mark(start, size, true);

        let block = AllocatedExtent::new(start, size);
        self.allocated.push(block);

        match self.check_pressure() {
            Some(level) => warn!(
                start = block.start,
                end = block.end,
                used = self.used,
                capacity = self.capacity(),
                pressure = %level,
                "Allocated block under memory pressure"
            ),
            None => info!(
                start = block.start,
                end = block.end,
                size,
                "Allocated block"
            ),
        }

        Ok(block)
    }

    /// Release `length` cells starting at `start` and append them to the free
    /// list as a new extent. Neighbouring free extents are left unmerged.
    ///
    /// Under [`FreePolicy::Strict`] the range must match a recorded block
    /// exactly. Under [`FreePolicy::Trusting`] the range is freed as given and
    /// an unmatched start leaves the allocated list untouched.
    pub fn deallocate(&mut self, start: Address, length: Size) -> HeapResult<()> {
        if length == 0 {
            warn!(start, "Rejected zero-length deallocation");
            return Err(HeapError::InvalidSize(length));
        }

        let capacity = self.capacity();
        if start.checked_add(length).map_or(true, |end| end > capacity) {
            warn!(start, length, capacity, "Deallocation range exceeds arena");
            return Err(HeapError::OutOfBounds {
                start,
                length,
                capacity,
            });
        }

        let position = self.allocated.iter().position(|b| b.start == start);

        if self.free_policy == FreePolicy::Strict {
            let Some(index) = position else {
                warn!(start, length, "Attempted to free unknown block");
                return Err(HeapError::UnknownAllocation(start));
            };
            let recorded = self.allocated[index].len();
            if recorded != length {
                warn!(start, recorded, requested = length, "Deallocation length mismatch");
                return Err(HeapError::ExtentMismatch {
                    start,
                    recorded,
                    requested: length,
                });
            }
        }

        self.used -= self.arena.mark(start, length, false);

        match position {
            Some(index) => {
                self.allocated.remove(index);
            }
            None => match self.enclosing_block(start) {
                Some(block) => warn!(
                    start,
                    length,
                    block_start = block.start,
                    block_end = block.end,
                    "Freeing cells inside a live block; the allocated list keeps the block"
                ),
                None => warn!(
                    start,
                    length,
                    "No allocated block starts here; freeing cells without updating the allocated list"
                ),
            },
        }

        self.free_list.push(FreeExtent::new(start, length));

        info!(
            start,
            length,
            free_extents = self.free_list.len(),
            available = capacity - self.used,
            "Deallocated block"
        );

        Ok(())
    }

    /// Switch placement strategy; effective from the next allocation
    pub fn set_strategy(&mut self, strategy: Strategy) {
        info!(from = %self.strategy, to = %strategy, "Strategy set to: {}", strategy);
        self.strategy = strategy;
    }

    /// Allocated block covering `cell`, if any
    pub fn enclosing_block(&self, cell: Address) -> Option<AllocatedExtent> {
        self.allocated.iter().copied().find(|b| b.contains(cell))
    }

    pub(super) fn check_pressure(&self) -> Option<HeapPressure> {
        match self.stats().pressure() {
            HeapPressure::Low => None,
            level => Some(level),
        }
    }
}
