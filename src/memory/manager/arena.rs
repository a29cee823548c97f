/*!
 * Arena
 * Per-cell occupancy map of the simulated address space
 */

use crate::core::types::{Address, Size};

/// Occupancy map, one flag per cell (`true` = occupied)
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Arena {
    cells: Vec<bool>,
}

impl Arena {
    pub fn new(capacity: Size) -> Self {
        Self {
            cells: vec![false; capacity],
        }
    }

    pub fn capacity(&self) -> Size {
        self.cells.len()
    }

    /// Set `[start, start + length)` to `occupied`, returning how many cells changed state.
    /// Callers bound-check the range first.
    pub fn mark(&mut self, start: Address, length: Size, occupied: bool) -> Size {
        let mut changed = 0;
        for cell in &mut self.cells[start..start + length] {
            if *cell != occupied {
                *cell = occupied;
                changed += 1;
            }
        }
        changed
    }

    pub fn is_occupied(&self, cell: Address) -> bool {
        self.cells.get(cell).copied().unwrap_or(false)
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}
