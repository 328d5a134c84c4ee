//! Import orchestration.
//!
//! [`run_import`] runs one roster (plus an optional positioning table)
//! through ingestion, table parsing, estimation, band resolution and the
//! batch summary. Each stage records an [`AuditStep`] describing what it
//! decided.

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::ingest::{RawRow, ingest_roster};
use crate::models::{
    AuditStep, AuditTrace, BandSource, BandStatus, ImportResult, ImportWarning, PositioningMeta,
    PositioningTable,
};

use super::band_resolver::resolve_bands;
use super::positioning_table::parse_positioning_table;
use super::summary::summarize;

/// Warning code emitted when a supplied positioning table is not usable.
pub const POSITIONING_REJECTED: &str = "POSITIONING_REJECTED";

/// Warning code emitted when positioning rows were dropped.
pub const POSITIONING_ROWS_SKIPPED: &str = "POSITIONING_ROWS_SKIPPED";

/// Band info when at least one row used a table band.
pub const BAND_INFO_TABLE: &str = "Bands from the positioning table, with peer estimation fallback";

/// Band info when every band was estimated.
pub const BAND_INFO_ESTIMATED: &str = "Bands estimated from peer salaries by group, level and currency";

/// The rows of one import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportInput {
    /// Roster rows.
    pub employees: Vec<RawRow>,
    /// Positioning table rows, if a table was supplied.
    #[serde(default)]
    pub positioning: Option<Vec<RawRow>>,
    /// Name of the source the rows came from.
    #[serde(default)]
    pub source_name: Option<String>,
}

/// Runs one import batch end to end.
///
/// Never fails: unusable rows are dropped and counted, and an unusable
/// positioning table turns into a warning and pure estimation.
///
/// # Example
///
/// ```
/// use compa_engine::calculation::{ImportInput, run_import};
/// use compa_engine::config::EngineConfig;
/// use compa_engine::models::BandStatus;
/// use serde_json::json;
///
/// let employees = vec![
///     json!({"Name": "Ana", "Pay Band": "Sales", "Level": "C", "Salary": 9000}),
///     json!({"Name": "Bia", "Pay Band": "Sales", "Level": "C", "Salary": 11000}),
/// ]
/// .into_iter()
/// .filter_map(|v| v.as_object().cloned())
/// .collect();
///
/// let input = ImportInput { employees, ..ImportInput::default() };
/// let result = run_import(&input, &EngineConfig::default());
///
/// assert_eq!(result.rows.len(), 2);
/// assert_eq!(result.rows[0].status, BandStatus::Within);
/// ```
pub fn run_import(input: &ImportInput, config: &EngineConfig) -> ImportResult {
    let start_time = Instant::now();
    let policy = config.policy();
    let mapping = config.mapping();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<ImportWarning> = Vec::new();

    // Roster
    let roster = ingest_roster(&input.employees, &mapping.employees, policy);
    steps.push(AuditStep {
        step_number: 1,
        rule_id: "roster_ingestion".to_string(),
        rule_name: "Roster Ingestion".to_string(),
        input: serde_json::json!({
            "rows": input.employees.len(),
            "salary_column": roster.columns.salary,
            "level_column": roster.columns.level,
            "group_columns": [roster.columns.pay_band, roster.columns.job_family],
        }),
        output: serde_json::json!({
            "employees": roster.employees.len(),
            "rows_without_salary": roster.rows_without_salary,
            "rows_with_negative_salary": roster.rows_with_negative_salary,
            "extra_columns": roster.extra_columns.len(),
        }),
        reasoning: format!(
            "{} of {} roster rows have a usable salary",
            roster.employees.len(),
            input.employees.len()
        ),
    });
    warnings.extend(roster.warnings.iter().cloned());

    // Positioning table
    let mut positioning = PositioningMeta {
        provided: input.positioning.is_some(),
        ..PositioningMeta::default()
    };
    let table: Option<PositioningTable> = match &input.positioning {
        None => {
            steps.push(AuditStep {
                step_number: 2,
                rule_id: "positioning_table".to_string(),
                rule_name: "Positioning Table".to_string(),
                input: serde_json::json!({ "provided": false }),
                output: serde_json::json!({ "accepted": false }),
                reasoning: "No positioning table supplied; all bands are estimated".to_string(),
            });
            None
        }
        Some(rows) => match parse_positioning_table(rows, &mapping.positioning, policy) {
            Ok(table) => {
                positioning.accepted = true;
                positioning.groups = table.groups().to_vec();
                positioning.level_columns = table.level_columns().to_vec();
                positioning.entries = table.len();
                positioning.skipped_rows = table.skipped_rows();

                if table.skipped_rows() > 0 {
                    warnings.push(ImportWarning::new(
                        POSITIONING_ROWS_SKIPPED,
                        format!(
                            "{} positioning rows had no group or positioning and were skipped",
                            table.skipped_rows()
                        ),
                        "low",
                    ));
                }
                steps.push(AuditStep {
                    step_number: 2,
                    rule_id: "positioning_table".to_string(),
                    rule_name: "Positioning Table".to_string(),
                    input: serde_json::json!({ "provided": true, "rows": rows.len() }),
                    output: serde_json::json!({
                        "accepted": true,
                        "entries": table.len(),
                        "groups": table.groups(),
                        "level_columns": table.level_columns(),
                        "skipped_rows": table.skipped_rows(),
                    }),
                    reasoning: format!(
                        "Positioning table accepted with {} level columns and {} groups",
                        table.level_columns().len(),
                        table.groups().len()
                    ),
                });
                Some(table)
            }
            Err(rejection) => {
                debug!(reason = %rejection, "Positioning table rejected");
                warnings.push(ImportWarning::new(
                    POSITIONING_REJECTED,
                    format!("{}; bands are estimated from peer salaries", rejection),
                    "medium",
                ));
                steps.push(AuditStep {
                    step_number: 2,
                    rule_id: "positioning_table".to_string(),
                    rule_name: "Positioning Table".to_string(),
                    input: serde_json::json!({ "provided": true, "rows": rows.len() }),
                    output: serde_json::json!({ "accepted": false }),
                    reasoning: format!("Positioning table rejected: {}", rejection),
                });
                None
            }
        },
    };

    // Bands
    let resolution = resolve_bands(&roster.employees, table.as_ref(), policy);
    let percentile_bands = resolution
        .estimated_bands
        .values()
        .filter(|b| b.source == BandSource::EstimatedPercentile)
        .count();
    steps.push(AuditStep {
        step_number: 3,
        rule_id: "peer_estimation".to_string(),
        rule_name: "Peer Band Estimation".to_string(),
        input: serde_json::json!({
            "employees": roster.employees.len(),
            "min_percentile_sample": policy.estimation.min_percentile_sample,
            "lower_ratio": policy.estimation.lower_ratio.normalize().to_string(),
            "upper_ratio": policy.estimation.upper_ratio.normalize().to_string(),
        }),
        output: serde_json::json!({
            "bands": resolution.estimated_bands.len(),
            "percentile_bands": percentile_bands,
            "ratio_bands": resolution.estimated_bands.len() - percentile_bands,
        }),
        reasoning: format!(
            "{} peer groups estimated: {} from percentiles, {} from ratios",
            resolution.estimated_bands.len(),
            percentile_bands,
            resolution.estimated_bands.len() - percentile_bands
        ),
    });

    let summary = summarize(&resolution.rows);
    steps.push(AuditStep {
        step_number: 4,
        rule_id: "band_resolution".to_string(),
        rule_name: "Band Resolution".to_string(),
        input: serde_json::json!({
            "table_bands": resolution.table_bands.len(),
            "estimated_bands": resolution.estimated_bands.len(),
            "match_unlevelled": policy.match_unlevelled,
        }),
        output: serde_json::json!({
            "table_sourced": summary.table_sourced,
            "estimated": summary.estimated,
            "no_band": summary.no_band,
        }),
        reasoning: format!(
            "{} rows resolved from the table, {} from estimates, {} without a band",
            summary.table_sourced, summary.estimated, summary.no_band
        ),
    });

    let band_info = if resolution
        .rows
        .iter()
        .any(|r| r.band_source == Some(BandSource::Table))
    {
        BAND_INFO_TABLE
    } else {
        BAND_INFO_ESTIMATED
    };

    let below = resolution
        .rows
        .iter()
        .filter(|r| r.status == BandStatus::Below)
        .count();
    debug!(
        employees = resolution.rows.len(),
        below,
        warnings = warnings.len(),
        "Import computed"
    );

    let bands = resolution
        .table_bands
        .into_values()
        .chain(resolution.estimated_bands.into_values())
        .collect();

    ImportResult {
        import_id: Uuid::new_v4(),
        computed_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        config_version: config.metadata().version.clone(),
        source_name: input.source_name.clone(),
        band_info: band_info.to_string(),
        rows: resolution.rows,
        bands,
        extra_columns: roster.extra_columns,
        positioning,
        summary,
        warnings,
        audit_trace: AuditTrace {
            steps,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}
