/*!
 * Simulator Configuration
 *
 * Defaults come from `core::limits`; each field can be overridden through an
 * environment variable:
 * - HEAP_CAPACITY: arena size in cells (default: 40)
 * - HEAP_STRATEGY: first | best | worst | next (default: best)
 * - HEAP_FREE_POLICY: strict | trusting (default: strict)
 * - HEAP_REPORT_FORMAT: text | json (default: text)
 * - HEAP_SCRIPT: path to a JSON scenario (default: built-in demonstration)
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{
    DEFAULT_CAPACITY, ENV_CAPACITY, ENV_FREE_POLICY, ENV_REPORT_FORMAT, ENV_SCRIPT, ENV_STRATEGY,
    MAX_CAPACITY,
};
use crate::core::types::Size;
use crate::memory::types::{FreePolicy, Strategy};
use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Heap simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapConfig {
    /// Arena size in cells
    pub capacity: Size,
    /// Initial placement strategy
    pub strategy: Strategy,
    /// Validation applied to deallocation requests
    pub free_policy: FreePolicy,
    /// Rendering used after each step
    pub report_format: ReportFormat,
    /// Scenario file to run instead of the built-in one
    pub script: Option<PathBuf>,
}

impl HeapConfig {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            strategy: Strategy::BestFit,
            free_policy: FreePolicy::Strict,
            report_format: ReportFormat::Text,
            script: None,
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source; missing or blank keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        if let Some(raw) = get(ENV_CAPACITY) {
            let capacity = parse_field::<Size>(ENV_CAPACITY, &raw)?;
            if capacity == 0 || capacity > MAX_CAPACITY {
                return Err(ConfigError::CapacityOutOfRange {
                    requested: capacity,
                    max: MAX_CAPACITY,
                });
            }
            config.capacity = capacity;
        }
        if let Some(raw) = get(ENV_STRATEGY) {
            config.strategy = parse_field(ENV_STRATEGY, &raw)?;
        }
        if let Some(raw) = get(ENV_FREE_POLICY) {
            config.free_policy = parse_field(ENV_FREE_POLICY, &raw)?;
        }
        if let Some(raw) = get(ENV_REPORT_FORMAT) {
            config.report_format = parse_field(ENV_REPORT_FORMAT, &raw)?;
        }
        if let Some(raw) = get(ENV_SCRIPT) {
            config.script = Some(PathBuf::from(raw));
        }

        Ok(config)
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_field<T>(key: &str, raw: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
