/*!
 * Heap Reports
 * Snapshot of heap state and its text/JSON renderings
 */

mod text;

use crate::core::types::{Address, Size};
use crate::memory::types::{FreeExtent, Strategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Point-in-time view of a heap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapReport {
    pub capacity: Size,
    pub strategy: Strategy,
    /// Per-cell occupancy, `true` = occupied
    pub cells: Vec<bool>,
    /// Allocated blocks in allocation order
    pub blocks: Vec<BlockEntry>,
    pub free_extents: Vec<FreeExtent>,
}

/// One line of the allocated-block listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    /// 1-based position in allocation order
    pub ordinal: usize,
    pub start: Address,
    pub end: Address,
}

/// Output format for rendered reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid report format '{}'. Valid: text, json", s)),
        }
    }
}

/// Occupancy line plus allocated-block listing
pub fn render_text(report: &HeapReport) -> String {
    report.to_string()
}

/// Pretty-printed JSON document
pub fn render_json(report: &HeapReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn render(report: &HeapReport, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => render_json(report),
    }
}
