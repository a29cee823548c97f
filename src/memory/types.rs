/*!
 * Memory Types
 * Extents, placement strategies, errors and statistics for the heap simulator
 */

use crate::core::limits::{
    MAX_CAPACITY, PRESSURE_CRITICAL_PERCENT, PRESSURE_HIGH_PERCENT, PRESSURE_MEDIUM_PERCENT,
};
use crate::core::types::{Address, Size};
use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Heap operation result
pub type HeapResult<T> = Result<T, HeapError>;

/// Heap errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum HeapError {
    #[error("Insufficient space: requested {requested} cells, largest free extent is {largest_free}")]
    #[diagnostic(
        code(heap::insufficient_space),
        help("Free some blocks or pick a strategy that leaves larger holes.")
    )]
    InsufficientSpace { requested: Size, largest_free: Size },

    #[error("Invalid size {0}: requests must cover at least one cell")]
    #[diagnostic(code(heap::invalid_size))]
    InvalidSize(Size),

    #[error("Invalid capacity {0}: the arena holds between 1 and {max} cells", max = MAX_CAPACITY)]
    #[diagnostic(code(heap::invalid_capacity))]
    InvalidCapacity(Size),

    #[error("Range [{start}, {start}+{length}) exceeds arena capacity {capacity}")]
    #[diagnostic(code(heap::out_of_bounds))]
    OutOfBounds {
        start: Address,
        length: Size,
        capacity: Size,
    },

    #[error("No allocated block starts at cell {0}")]
    #[diagnostic(
        code(heap::unknown_allocation),
        help("Deallocate using the start returned by allocate.")
    )]
    UnknownAllocation(Address),

    #[error("Block at cell {start} holds {recorded} cells, but {requested} were released")]
    #[diagnostic(
        code(heap::extent_mismatch),
        help("Release the whole block; partial frees are not supported.")
    )]
    ExtentMismatch {
        start: Address,
        recorded: Size,
        requested: Size,
    },

    #[error("Heap corruption detected: {0}")]
    #[diagnostic(code(heap::corruption))]
    CorruptionDetected(String),
}

/// A run of free cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeExtent {
    pub start: Address,
    pub length: Size,
}

impl FreeExtent {
    pub fn new(start: Address, length: Size) -> Self {
        Self { start, length }
    }

    /// One past the last cell
    #[inline]
    pub fn end(&self) -> Address {
        self.start + self.length
    }

    #[inline]
    pub fn fits(&self, size: Size) -> bool {
        self.length >= size
    }
}

/// A successful allocation, `end` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedExtent {
    pub start: Address,
    pub end: Address,
}

impl AllocatedExtent {
    pub fn new(start: Address, size: Size) -> Self {
        Self {
            start,
            end: start + size - 1,
        }
    }

    #[inline]
    pub fn len(&self) -> Size {
        self.end - self.start + 1
    }

    #[inline]
    pub fn contains(&self, cell: Address) -> bool {
        cell >= self.start && cell <= self.end
    }
}

/// Placement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// First extent in list order that fits
    FirstFit,
    /// Smallest extent that fits
    BestFit,
    /// Largest extent that fits
    WorstFit,
    /// First fit, resuming after the previously consumed extent
    NextFit,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::FirstFit,
        Strategy::BestFit,
        Strategy::WorstFit,
        Strategy::NextFit,
    ];

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstFit => "first",
            Self::BestFit => "best",
            Self::WorstFit => "worst",
            Self::NextFit => "next",
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "first_fit" | "first-fit" | "firstfit" => Ok(Self::FirstFit),
            "best" | "best_fit" | "best-fit" | "bestfit" => Ok(Self::BestFit),
            "worst" | "worst_fit" | "worst-fit" | "worstfit" => Ok(Self::WorstFit),
            "next" | "next_fit" | "next-fit" | "nextfit" => Ok(Self::NextFit),
            _ => Err(format!(
                "Invalid strategy '{}'. Valid: first, best, worst, next",
                s
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Strategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How deallocation treats the caller's start/length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreePolicy {
    /// Reject releases that do not match a recorded block exactly
    #[default]
    Strict,
    /// Free whatever range is given; unmatched starts leave the allocated list alone
    Trusting,
}

impl FromStr for FreePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "trusting" | "trust" | "lenient" => Ok(Self::Trusting),
            _ => Err(format!("Invalid free policy '{}'. Valid: strict, trusting", s)),
        }
    }
}

/// Heap statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeapStats {
    pub capacity: Size,
    pub used_cells: Size,
    pub free_cells: Size,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_extents: usize,
    pub largest_free_extent: Size,
    /// 0.0 when all free cells form one extent, approaching 1.0 as they scatter
    pub fragmentation: f64,
    pub strategy: Strategy,
}

impl HeapStats {
    pub fn pressure(&self) -> HeapPressure {
        if self.usage_percentage >= PRESSURE_CRITICAL_PERCENT {
            HeapPressure::Critical
        } else if self.usage_percentage >= PRESSURE_HIGH_PERCENT {
            HeapPressure::High
        } else if self.usage_percentage >= PRESSURE_MEDIUM_PERCENT {
            HeapPressure::Medium
        } else {
            HeapPressure::Low
        }
    }
}

/// Heap pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeapPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for HeapPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HeapPressure::Low => write!(f, "LOW"),
            HeapPressure::Medium => write!(f, "MEDIUM"),
            HeapPressure::High => write!(f, "HIGH"),
            HeapPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
