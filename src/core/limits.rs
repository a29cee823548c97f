/*!
 * Simulator Limits and Constants
 *
 * Defaults and thresholds shared by the allocator, configuration and reports.
 */

// =============================================================================
// ARENA DEFAULTS
// =============================================================================

/// Default arena capacity in cells
/// Matches the canonical demonstration run
pub const DEFAULT_CAPACITY: usize = 40;

/// Upper bound accepted from configuration (1M cells)
/// The occupancy map is one `bool` per cell, so this caps it at 1MB
pub const MAX_CAPACITY: usize = 1024 * 1024;

// =============================================================================
// PRESSURE THRESHOLDS (percent of capacity in use)
// =============================================================================

pub const PRESSURE_MEDIUM_PERCENT: f64 = 60.0;
pub const PRESSURE_HIGH_PERCENT: f64 = 80.0;
pub const PRESSURE_CRITICAL_PERCENT: f64 = 95.0;

// =============================================================================
// RENDERING
// =============================================================================

/// Marker for an occupied cell
pub const OCCUPIED_CELL: &str = "[X]";

/// Marker for a free cell
pub const FREE_CELL: &str = "[ ]";

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

pub const ENV_CAPACITY: &str = "HEAP_CAPACITY";
pub const ENV_STRATEGY: &str = "HEAP_STRATEGY";
pub const ENV_FREE_POLICY: &str = "HEAP_FREE_POLICY";
pub const ENV_REPORT_FORMAT: &str = "HEAP_REPORT_FORMAT";
pub const ENV_SCRIPT: &str = "HEAP_SCRIPT";
pub const ENV_TRACE_JSON: &str = "HEAP_TRACE_JSON";
