/*!
 * Free List
 * Ordered free extents and the placement strategies that search them
 */

use crate::core::types::{Address, Size};
use crate::memory::types::{FreeExtent, Strategy};

/// Free extents in creation order, plus the next-fit resume position.
///
/// Order is never sorted: first-fit and next-fit scan in list order, and
/// best/worst-fit break ties on the earliest index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeList {
    extents: Vec<FreeExtent>,
    /// Index where the next next-fit scan begins. Always `< len()`, or 0 when empty.
    cursor: usize,
}

impl FreeList {
    /// One extent spanning the whole arena
    pub fn new(capacity: Size) -> Self {
        Self {
            extents: vec![FreeExtent::new(0, capacity)],
            cursor: 0,
        }
    }

    /// Build from an explicit extent list (cursor at 0)
    pub fn from_extents(extents: Vec<FreeExtent>) -> Self {
        Self { extents, cursor: 0 }
    }

    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = if self.extents.is_empty() {
            0
        } else {
            cursor % self.extents.len()
        };
        self
    }

    /// Choose the extent that satisfies `size` under `strategy`.
    ///
    /// Pure: the cursor only moves when an extent is consumed.
    pub fn select(&self, strategy: Strategy, size: Size) -> Option<usize> {
        match strategy {
            Strategy::FirstFit => self.extents.iter().position(|e| e.fits(size)),
            Strategy::BestFit => self.select_by(size, |candidate, chosen| candidate < chosen),
            Strategy::WorstFit => self.select_by(size, |candidate, chosen| candidate > chosen),
            Strategy::NextFit => {
                let count = self.extents.len();
                if count == 0 {
                    return None;
                }
                let origin = self.cursor % count;
                (0..count)
                    .map(|offset| (origin + offset) % count)
                    .find(|&index| self.extents[index].fits(size))
            }
        }
    }

    /// Scan every fitting extent, replacing the current choice only when
    /// `better(candidate_len, chosen_len)` holds. Strict comparisons keep the
    /// earliest of equal candidates.
    fn select_by(&self, size: Size, better: impl Fn(Size, Size) -> bool) -> Option<usize> {
        let mut chosen: Option<(usize, Size)> = None;
        for (index, extent) in self.extents.iter().enumerate() {
            if !extent.fits(size) {
                continue;
            }
            match chosen {
                Some((_, length)) if !better(extent.length, length) => {}
                _ => chosen = Some((index, extent.length)),
            }
        }
        chosen.map(|(index, _)| index)
    }

    /// Take `size` cells from the front of the extent at `index` and return
    /// their start. An exactly consumed extent leaves the list; otherwise its
    /// tail stays in place.
    ///
    /// With `advance` set (next-fit), the cursor moves to the position after
    /// the consumed extent, re-derived against the post-mutation list. Without
    /// it, the cursor keeps naming the same extent across a removal.
    pub fn consume(&mut self, index: usize, size: Size, advance: bool) -> Address {
        let extent = &mut self.extents[index];
        let start = extent.start;

        let removed = if extent.length == size {
            self.extents.remove(index);
            true
        } else {
            extent.start += size;
            extent.length -= size;
            false
        };

        let count = self.extents.len();
        if count == 0 {
            self.cursor = 0;
        } else if advance {
            // After a removal the follower already sits at `index`
            self.cursor = if removed { index % count } else { (index + 1) % count };
        } else if removed {
            if index < self.cursor {
                self.cursor -= 1;
            }
            if self.cursor >= count {
                self.cursor = 0;
            }
        }

        start
    }

    /// Append a released extent. No merging with neighbours.
    pub fn push(&mut self, extent: FreeExtent) {
        self.extents.push(extent);
    }

    pub fn largest(&self) -> Size {
        self.extents.iter().map(|e| e.length).max().unwrap_or(0)
    }

    pub fn total(&self) -> Size {
        self.extents.iter().map(|e| e.length).sum()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    pub fn as_slice(&self) -> &[FreeExtent] {
        &self.extents
    }

    pub fn iter(&self) -> impl Iterator<Item = &FreeExtent> {
        self.extents.iter()
    }
}
