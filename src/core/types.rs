/*!
 * Core Types
 * Common types used across the simulator
 */

/// Cell offset inside the arena
pub type Address = usize;

/// Cell count for extents, requests and capacities
pub type Size = usize;
