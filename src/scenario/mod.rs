/*!
 * Scenarios
 * Scripted operation sequences run against a heap
 */

mod operation;

pub use operation::{Operation, Step, StepOutcome};

use crate::core::errors::{ScenarioError, ScenarioResult};
use crate::core::limits::DEFAULT_CAPACITY;
use crate::core::types::Size;
use crate::memory::traits::{Allocator, HeapInfo};
use crate::memory::types::{FreePolicy, HeapResult, Strategy};
use crate::memory::HeapAllocator;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, info_span, warn};

/// Heap parameters plus an ordered list of operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub capacity: Size,
    pub strategy: Strategy,
    /// Overrides the caller's policy when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_policy: Option<FreePolicy>,
    pub operations: Vec<Operation>,
}

impl Scenario {
    /// The demonstration run: 40 cells under best fit, two allocations, a
    /// release, then a switch to next fit.
    pub fn canonical() -> Self {
        use Operation::*;
        Self {
            capacity: DEFAULT_CAPACITY,
            strategy: Strategy::BestFit,
            free_policy: None,
            operations: vec![
                Report,
                Allocate { size: 5 },
                Report,
                Allocate { size: 3 },
                Report,
                Deallocate {
                    start: 5,
                    length: 3,
                },
                Report,
                SetStrategy {
                    strategy: Strategy::NextFit,
                },
                Allocate { size: 8 },
                Report,
            ],
        }
    }

    pub fn from_json(json: &str) -> ScenarioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let scenario = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            operations = scenario.operations.len(),
            "Loaded scenario"
        );
        Ok(scenario)
    }

    /// Fresh heap for this scenario; `default_policy` applies unless the script sets one
    pub fn build_heap(&self, default_policy: FreePolicy) -> HeapResult<HeapAllocator> {
        Ok(HeapAllocator::new(self.capacity, self.strategy)?
            .with_free_policy(self.free_policy.unwrap_or(default_policy)))
    }

    /// Execute every operation in order, calling `observer` after each one.
    ///
    /// Heap errors are recorded as failed steps and the run continues.
    pub fn run<H, F>(&self, heap: &mut H, mut observer: F) -> Vec<Step>
    where
        H: Allocator + HeapInfo,
        F: FnMut(&Step, &H),
    {
        let span = info_span!("scenario", operations = self.operations.len());
        let _entered = span.enter();

        let mut steps = Vec::with_capacity(self.operations.len());
        for (index, &operation) in self.operations.iter().enumerate() {
            debug!(index, %operation, "Running step");
            let outcome = apply(heap, operation);
            if let StepOutcome::Failed { ref error } = outcome {
                warn!(index, %operation, %error, "Step failed");
            }

            let step = Step {
                index,
                operation,
                outcome,
            };
            observer(&step, &*heap);
            steps.push(step);
        }

        let failures = steps.iter().filter(|s| s.outcome.is_failure()).count();
        info!(steps = steps.len(), failures, "Scenario complete");
        steps
    }
}

fn apply<H: Allocator>(heap: &mut H, operation: Operation) -> StepOutcome {
    match operation {
        Operation::Allocate { size } => match heap.allocate(size) {
            Ok(block) => StepOutcome::Allocated { block },
            Err(error) => StepOutcome::Failed { error },
        },
        Operation::Deallocate { start, length } => match heap.deallocate(start, length) {
            Ok(()) => StepOutcome::Deallocated { start, length },
            Err(error) => StepOutcome::Failed { error },
        },
        Operation::SetStrategy { strategy } => {
            heap.set_strategy(strategy);
            StepOutcome::StrategyChanged { strategy }
        }
        Operation::Report => StepOutcome::Reported,
    }
}
