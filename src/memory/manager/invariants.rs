/*!
 * Invariant Checks
 * Verifies that the arena and both extent lists agree
 */

use super::HeapAllocator;
use crate::memory::types::{HeapError, HeapResult};

impl HeapAllocator {
    /// Check that free and allocated extents partition the arena exactly and
    /// that every cell's flag matches the list that claims it.
    ///
    /// Always holds under [`FreePolicy::Strict`](crate::memory::FreePolicy::Strict);
    /// a trusting heap fed bad ranges will fail here.
    pub fn check_invariants(&self) -> HeapResult<()> {
        let capacity = self.capacity();
        let corrupt = |msg: String| -> HeapResult<()> { Err(HeapError::CorruptionDetected(msg)) };

        // 0 = unclaimed, 1 = free, 2 = allocated
        let mut owner = vec![0u8; capacity];

        for extent in self.free_list.iter() {
            if extent.length == 0 {
                return corrupt(format!("empty free extent at cell {}", extent.start));
            }
            if extent.end() > capacity {
                return corrupt(format!(
                    "free extent {}+{} past capacity {}",
                    extent.start, extent.length, capacity
                ));
            }
            for cell in extent.start..extent.end() {
                if owner[cell] != 0 {
                    return corrupt(format!("cell {} claimed by more than one extent", cell));
                }
                owner[cell] = 1;
            }
        }

        for block in &self.allocated {
            if block.end < block.start || block.end >= capacity {
                return corrupt(format!("allocated block {}..={} is malformed", block.start, block.end));
            }
            for cell in block.start..=block.end {
                if owner[cell] != 0 {
                    return corrupt(format!("cell {} claimed by more than one extent", cell));
                }
                owner[cell] = 2;
            }
        }

        for (cell, &claim) in owner.iter().enumerate() {
            if claim == 0 {
                return corrupt(format!("cell {} is neither free nor allocated", cell));
            }
            if self.arena.is_occupied(cell) != (claim == 2) {
                return corrupt(format!("cell {} flag disagrees with extent lists", cell));
            }
        }

        let occupied = self.arena.cells().iter().filter(|&&c| c).count();
        if occupied != self.used {
            return corrupt(format!("used counter {} but {} cells occupied", self.used, occupied));
        }

        let cursor = self.free_list.cursor();
        if cursor != 0 && cursor >= self.free_list.len() {
            return corrupt(format!(
                "next-fit cursor {} outside free list of {}",
                cursor,
                self.free_list.len()
            ));
        }

        Ok(())
    }
}
