//! Import result models for the Compa-Ratio Band Engine.
//!
//! This module contains the [`ImportResult`] type and its associated
//! structures: one [`ResultRow`] per employee, the bands that were built,
//! a batch summary, and an audit trace of the batch-level decisions.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BandSource, ComputedBand, ExtraValue};

/// How an employee's salary relates to the resolved band.
///
/// # Example
///
/// ```
/// use compa_engine::models::BandStatus;
///
/// assert_eq!(BandStatus::MissingRangeBounds.to_string(), "missing range bounds");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandStatus {
    /// Salary below P80.
    Below,
    /// Salary between P80 and P120, both inclusive.
    Within,
    /// Salary above P120.
    Above,
    /// A midpoint exists but P80 or P120 is missing.
    MissingRangeBounds,
    /// No band could be resolved.
    NoBand,
}

impl fmt::Display for BandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BandStatus::Below => "below",
            BandStatus::Within => "within",
            BandStatus::Above => "above",
            BandStatus::MissingRangeBounds => "missing range bounds",
            BandStatus::NoBand => "no band",
        };
        f.write_str(label)
    }
}

/// One employee joined with the band resolved for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// 1-based position of the row in the source roster.
    pub row_index: usize,
    /// Employee identifier.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Job family label.
    pub job_family: String,
    /// Pay band label.
    pub pay_band: String,
    /// Level text as it appeared in the roster.
    pub level: String,
    /// Normalized level letter, or empty.
    pub level_letter: String,
    /// Currency code.
    pub currency: String,
    /// Base salary.
    pub base_salary: Decimal,
    /// The group the band was looked up under, after group matching.
    pub group: String,
    /// Lower bound of the resolved band.
    pub p80: Option<Decimal>,
    /// Midpoint of the resolved band.
    pub p100: Option<Decimal>,
    /// Upper bound of the resolved band.
    pub p120: Option<Decimal>,
    /// Salary divided by P100.
    pub compa: Option<Decimal>,
    /// Relationship between salary and band.
    pub status: BandStatus,
    /// Provenance of the band; `None` when no band was found.
    pub band_source: Option<BandSource>,
    /// Peer sample size behind the band; `None` when no band was found.
    pub band_sample_size: Option<usize>,
    /// Pass-through columns, for display only.
    #[serde(default)]
    pub extras: BTreeMap<String, ExtraValue>,
}

/// Count of below-band employees for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBelowCount {
    /// Matched group label.
    pub group: String,
    /// Employees of the group below P80.
    pub below: usize,
    /// All employees of the group.
    pub total: usize,
}

/// Aggregated counts over all result rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Number of result rows.
    pub total: usize,
    /// Rows below P80.
    pub below: usize,
    /// Rows within the band.
    pub within: usize,
    /// Rows above P120.
    pub above: usize,
    /// Rows with a midpoint but no full range.
    pub missing_range_bounds: usize,
    /// Rows with no band.
    pub no_band: usize,
    /// Rows whose band came from the positioning table.
    pub table_sourced: usize,
    /// Rows whose band was estimated.
    pub estimated: usize,
    /// Mean compa-ratio over rows that have one; absent when the sum overflows.
    pub average_compa: Option<Decimal>,
    /// Groups with the most below-band employees, at most five.
    pub top_groups_below: Vec<GroupBelowCount>,
}

/// What happened to the positioning table of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositioningMeta {
    /// Positioning rows were supplied.
    pub provided: bool,
    /// The table passed validation and was used.
    pub accepted: bool,
    /// Group labels found in the table.
    pub groups: Vec<String>,
    /// Level letters the table has columns for.
    pub level_columns: Vec<String>,
    /// Number of stored entries.
    pub entries: usize,
    /// Rows dropped for a missing group or positioning.
    pub skipped_rows: usize,
}

/// A non-fatal condition worth surfacing to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl ImportWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// A single step in the audit trace recording a batch-level decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of steps.
    pub steps: Vec<AuditStep>,
    /// The total computation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of one import batch.
///
/// Each import supersedes the previous one wholesale; nothing in here is
/// updated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Unique identifier of this import.
    pub import_id: Uuid,
    /// When the import was computed.
    pub computed_at: DateTime<Utc>,
    /// Crate version that computed it.
    pub engine_version: String,
    /// Version of the configuration in use.
    pub config_version: String,
    /// Caller-supplied name of the source (e.g. a file name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    /// One-line description of how bands were obtained.
    pub band_info: String,
    /// One row per ingested employee, in roster order.
    pub rows: Vec<ResultRow>,
    /// Every band built for this import, table bands first.
    pub bands: Vec<ComputedBand>,
    /// Roster columns passed through as extras, sorted.
    pub extra_columns: Vec<String>,
    /// Positioning table outcome.
    pub positioning: PositioningMeta,
    /// Aggregated counts.
    pub summary: ImportSummary,
    /// Non-fatal conditions.
    pub warnings: Vec<ImportWarning>,
    /// Batch-level decisions.
    pub audit_trace: AuditTrace,
}
