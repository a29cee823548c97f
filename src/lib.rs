/*!
 * Heap Simulator Library
 * Fixed-capacity heap with first/best/worst/next-fit placement
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod report;
pub mod scenario;

// Re-exports
pub use crate::config::HeapConfig;
pub use crate::core::errors::{ConfigError, ScenarioError};
pub use crate::memory::{
    AllocatedExtent, Allocator, FreeExtent, FreePolicy, HeapAllocator, HeapError, HeapInfo,
    HeapResult, HeapStats, SharedHeap, Strategy,
};
pub use crate::monitoring::init_tracing;
pub use crate::report::{render, render_json, render_text, HeapReport, ReportFormat};
pub use crate::scenario::{Operation, Scenario, Step, StepOutcome};
