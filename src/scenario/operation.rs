/*!
 * Scenario Operations
 * Script steps and their recorded outcomes
 */

use crate::core::types::{Address, Size};
use crate::memory::types::{AllocatedExtent, HeapError, Strategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scripted call against the heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Allocate { size: Size },
    Deallocate { start: Address, length: Size },
    SetStrategy { strategy: Strategy },
    Report,
}

impl Operation {
    /// Whether the step can change heap state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Operation::Report)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Allocate { size } => write!(f, "allocate {}", size),
            Operation::Deallocate { start, length } => {
                write!(f, "deallocate {} cells at {}", length, start)
            }
            Operation::SetStrategy { strategy } => write!(f, "set strategy {}", strategy),
            Operation::Report => write!(f, "report"),
        }
    }
}

/// What happened when a step ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Allocated { block: AllocatedExtent },
    Deallocated { start: Address, length: Size },
    StrategyChanged { strategy: Strategy },
    Reported,
    Failed { error: HeapError },
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

/// A step paired with its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 0-based position in the script
    pub index: usize,
    pub operation: Operation,
    pub outcome: StepOutcome,
}
