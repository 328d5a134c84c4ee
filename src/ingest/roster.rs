//! Roster ingestion.
//!
//! Resolves the employee field mapping against the roster headers once,
//! then turns each raw row into an [`EmployeeRecord`]. Rows without a
//! usable salary are dropped and counted rather than failing the batch.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::{cell_text, normalize_currency, normalize_level, parse_value};
use crate::config::{BandPolicy, EmployeeFieldMapping};
use crate::models::{EmployeeRecord, ExtraValue, ImportWarning};

use super::columns::{RawRow, cell, collect_headers, resolve_column};

/// Warning code emitted when no salary column can be found.
pub const SALARY_COLUMN_MISSING: &str = "SALARY_COLUMN_MISSING";

/// Warning code emitted when rows were dropped for a missing salary.
pub const ROWS_WITHOUT_SALARY: &str = "ROWS_WITHOUT_SALARY";

/// Warning code emitted when rows were dropped for a negative salary.
pub const NEGATIVE_SALARY: &str = "NEGATIVE_SALARY";

/// Roster columns resolved against the field mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Employee identifier column.
    pub employee_id: Option<String>,
    /// Given name column.
    pub first_name: Option<String>,
    /// Family name column.
    pub last_name: Option<String>,
    /// Full name column.
    pub employee_name: Option<String>,
    /// Job family column.
    pub job_family: Option<String>,
    /// Pay band column.
    pub pay_band: Option<String>,
    /// Level column.
    pub level: Option<String>,
    /// Currency column.
    pub currency: Option<String>,
    /// Salary column.
    pub salary: Option<String>,
}

impl ResolvedColumns {
    /// Resolves every mapped field against the headers.
    pub fn resolve(headers: &[String], mapping: &EmployeeFieldMapping) -> Self {
        Self {
            employee_id: resolve_column(headers, &mapping.employee_id),
            first_name: resolve_column(headers, &mapping.first_name),
            last_name: resolve_column(headers, &mapping.last_name),
            employee_name: resolve_column(headers, &mapping.employee_name),
            job_family: resolve_column(headers, &mapping.job_family),
            pay_band: resolve_column(headers, &mapping.pay_band),
            level: resolve_column(headers, &mapping.level),
            currency: resolve_column(headers, &mapping.currency),
            salary: resolve_column(headers, &mapping.salary),
        }
    }

    fn core(&self) -> BTreeSet<&str> {
        [
            &self.employee_id,
            &self.first_name,
            &self.last_name,
            &self.employee_name,
            &self.job_family,
            &self.pay_band,
            &self.level,
            &self.currency,
            &self.salary,
        ]
        .into_iter()
        .filter_map(|c| c.as_deref())
        .collect()
    }
}

/// The ingested roster.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Records with a usable salary, in roster order.
    pub employees: Vec<EmployeeRecord>,
    /// The columns the field mapping resolved to.
    pub columns: ResolvedColumns,
    /// Non-core columns carried as extras, sorted.
    pub extra_columns: Vec<String>,
    /// Rows dropped because the salary was missing or unparseable.
    pub rows_without_salary: usize,
    /// Rows dropped because the salary was negative.
    pub rows_with_negative_salary: usize,
    /// Conditions worth reporting to the caller.
    pub warnings: Vec<ImportWarning>,
}

impl Roster {
    /// Total number of dropped rows.
    pub fn skipped_rows(&self) -> usize {
        self.rows_without_salary + self.rows_with_negative_salary
    }
}

/// Turns raw roster rows into employee records.
///
/// The display name is the name column, else "first last". Currency falls
/// back to the policy's default. Every column outside the mapping is
/// carried in `extras`, as a number when it parses and as trimmed text
/// otherwise. Row indices are 1-based positions in `rows`, so dropped rows
/// leave gaps.
pub fn ingest_roster(
    rows: &[RawRow],
    mapping: &EmployeeFieldMapping,
    policy: &BandPolicy,
) -> Roster {
    let headers = collect_headers(rows);
    let columns = ResolvedColumns::resolve(&headers, mapping);

    let core = columns.core();
    let extra_columns: Vec<String> = headers
        .iter()
        .filter(|h| !h.trim().is_empty() && !core.contains(h.as_str()))
        .cloned()
        .collect();

    let mut roster = Roster {
        columns: columns.clone(),
        extra_columns,
        ..Roster::default()
    };

    if columns.salary.is_none() && !rows.is_empty() {
        roster.warnings.push(ImportWarning::new(
            SALARY_COLUMN_MISSING,
            "No salary column found in the roster; no employee can be evaluated",
            "high",
        ));
    }

    for (index, row) in rows.iter().enumerate() {
        let Some(base_salary) = parse_value(cell(row, columns.salary.as_deref())) else {
            roster.rows_without_salary += 1;
            continue;
        };
        if base_salary < Decimal::ZERO {
            roster.rows_with_negative_salary += 1;
            continue;
        }

        let text = |column: &Option<String>| cell_text(cell(row, column.as_deref()));

        let mut employee_name = text(&columns.employee_name);
        if employee_name.is_empty() {
            employee_name = [text(&columns.first_name), text(&columns.last_name)]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
        }

        let level_raw = text(&columns.level);
        let extras: BTreeMap<String, ExtraValue> = roster
            .extra_columns
            .iter()
            .map(|header| {
                let value = cell(row, Some(header));
                let extra = match parse_value(value) {
                    Some(number) => ExtraValue::Number(number),
                    None => ExtraValue::Text(cell_text(value)),
                };
                (header.clone(), extra)
            })
            .collect();

        roster.employees.push(EmployeeRecord {
            row_index: index + 1,
            employee_id: text(&columns.employee_id),
            employee_name,
            job_family: text(&columns.job_family),
            pay_band: text(&columns.pay_band),
            level_letter: normalize_level(&level_raw),
            level_raw,
            currency: normalize_currency(&text(&columns.currency), &policy.default_currency),
            base_salary,
            extras,
        });
    }

    if columns.salary.is_some() && roster.rows_without_salary > 0 {
        roster.warnings.push(ImportWarning::new(
            ROWS_WITHOUT_SALARY,
            format!(
                "{} roster rows had no parseable salary and were skipped",
                roster.rows_without_salary
            ),
            "low",
        ));
    }
    if roster.rows_with_negative_salary > 0 {
        roster.warnings.push(ImportWarning::new(
            NEGATIVE_SALARY,
            format!(
                "{} roster rows had a negative salary and were skipped",
                roster.rows_with_negative_salary
            ),
            "medium",
        ));
    }

    debug!(
        rows = rows.len(),
        employees = roster.employees.len(),
        skipped_rows = roster.skipped_rows(),
        salary_column = ?columns.salary,
        "Roster ingested"
    );

    roster
}
