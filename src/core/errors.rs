/*!
 * Error Types
 * Configuration and scenario errors with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export HeapError from memory module
pub use crate::memory::HeapError;

/// Configuration errors raised while reading the environment
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Unset the variable to fall back to the default.")
    )]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Capacity {requested} is outside the accepted range 1..={max}")]
    #[diagnostic(
        code(config::capacity_out_of_range),
        help("Pick a capacity between 1 and the configured maximum.")
    )]
    CapacityOutOfRange { requested: usize, max: usize },
}

/// Errors loading or starting a scenario
#[derive(Error, Debug, Diagnostic)]
pub enum ScenarioError {
    #[error("Failed to read scenario file {path}: {source}")]
    #[diagnostic(code(scenario::io), help("Check that the path exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scenario: {0}")]
    #[diagnostic(
        code(scenario::parse),
        help("Scenarios are JSON objects with capacity, strategy and an operations array.")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Scenario could not build its heap: {0}")]
    #[diagnostic(code(scenario::heap))]
    Heap(#[from] HeapError),
}

/// Config operation result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Scenario operation result
pub type ScenarioResult<T> = Result<T, ScenarioError>;
