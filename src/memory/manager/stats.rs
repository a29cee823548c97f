/*!
 * Heap Statistics
 * Usage, fragmentation and report snapshots
 */

use super::HeapAllocator;
use crate::memory::types::HeapStats;
use crate::report::{BlockEntry, HeapReport};

impl HeapAllocator {
    /// Get heap statistics
    pub fn stats(&self) -> HeapStats {
        let capacity = self.capacity();
        let free_cells = capacity - self.used;
        let largest_free_extent = self.free_list.largest();

        let fragmentation = if free_cells == 0 {
            0.0
        } else {
            1.0 - (largest_free_extent.min(free_cells) as f64 / free_cells as f64)
        };

        HeapStats {
            capacity,
            used_cells: self.used,
            free_cells,
            usage_percentage: (self.used as f64 / capacity as f64) * 100.0,
            allocated_blocks: self.allocated.len(),
            free_extents: self.free_list.len(),
            largest_free_extent,
            fragmentation,
            strategy: self.strategy,
        }
    }

    /// Snapshot occupancy and allocated blocks. Never mutates.
    pub fn report(&self) -> HeapReport {
        HeapReport {
            capacity: self.capacity(),
            strategy: self.strategy,
            cells: self.arena.cells().to_vec(),
            blocks: self
                .allocated
                .iter()
                .enumerate()
                .map(|(i, block)| BlockEntry {
                    ordinal: i + 1,
                    start: block.start,
                    end: block.end,
                })
                .collect(),
            free_extents: self.free_list.as_slice().to_vec(),
        }
    }
}
