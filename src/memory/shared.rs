/*!
 * Shared Heap
 * Mutex-guarded handle for callers on several threads
 */

use super::manager::HeapAllocator;
use super::traits::{Allocator, HeapInfo};
use super::types::{AllocatedExtent, HeapResult, HeapStats, Strategy};
use crate::core::types::{Address, Size};
use crate::report::HeapReport;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one heap.
///
/// Every operation holds the lock for its whole duration, so each call is
/// atomic with respect to the other handles.
#[derive(Debug, Clone)]
pub struct SharedHeap {
    inner: Arc<Mutex<HeapAllocator>>,
}

impl SharedHeap {
    pub fn new(heap: HeapAllocator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(heap)),
        }
    }

    /// Run `f` with exclusive access, for multi-step sequences that must not interleave
    pub fn with<R>(&self, f: impl FnOnce(&mut HeapAllocator) -> R) -> R {
        let mut heap = self.inner.lock();
        f(&mut heap)
    }

    /// Clone out the current state
    pub fn snapshot(&self) -> HeapAllocator {
        self.inner.lock().clone()
    }
}

impl Allocator for SharedHeap {
    fn allocate(&mut self, size: Size) -> HeapResult<AllocatedExtent> {
        self.inner.lock().allocate(size)
    }

    fn deallocate(&mut self, start: Address, length: Size) -> HeapResult<()> {
        self.inner.lock().deallocate(start, length)
    }

    fn set_strategy(&mut self, strategy: Strategy) {
        self.inner.lock().set_strategy(strategy)
    }

    fn strategy(&self) -> Strategy {
        self.inner.lock().strategy()
    }
}

impl HeapInfo for SharedHeap {
    fn capacity(&self) -> Size {
        self.inner.lock().capacity()
    }

    fn stats(&self) -> HeapStats {
        self.inner.lock().stats()
    }

    fn report(&self) -> HeapReport {
        self.inner.lock().report()
    }
}

impl From<HeapAllocator> for SharedHeap {
    fn from(heap: HeapAllocator) -> Self {
        Self::new(heap)
    }
}
