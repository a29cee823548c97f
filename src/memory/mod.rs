/*!
 * Memory Module
 * Heap simulation: placement strategies, bookkeeping and shared access
 */

pub mod manager;
pub mod shared;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::{FreeList, HeapAllocator};
pub use shared::SharedHeap;
pub use traits::*;
pub use types::*;
