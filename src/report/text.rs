/*!
 * Text Rendering
 */

use super::HeapReport;
use crate::core::limits::{FREE_CELL, OCCUPIED_CELL};
use std::fmt;

impl fmt::Display for HeapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Heap state ({} cells, {} fit):", self.capacity, self.strategy)?;
        writeln!(f, "Legend: {} = occupied, {} = free", OCCUPIED_CELL, FREE_CELL)?;
        writeln!(f)?;

        for &occupied in &self.cells {
            f.write_str(if occupied { OCCUPIED_CELL } else { FREE_CELL })?;
        }
        writeln!(f)?;
        writeln!(f)?;

        writeln!(f, "Allocated blocks:")?;
        if self.blocks.is_empty() {
            writeln!(f, "(none)")?;
        }
        for block in &self.blocks {
            writeln!(f, "Block {}: start = {}, end = {}", block.ordinal, block.start, block.end)?;
        }
        Ok(())
    }
}
