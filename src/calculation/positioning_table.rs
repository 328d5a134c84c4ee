//! Positioning table parsing.
//!
//! Turns the raw positioning rows into a [`PositioningTable`]. A table that
//! lacks its mapped columns or has too few level columns is rejected as a
//! whole, and the import falls back to pure estimation.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::config::{BandPolicy, PositioningFieldMapping};
use crate::ingest::{RawRow, cell, collect_headers, resolve_column};
use crate::models::{PositioningEntry, PositioningTable};

use super::normalize::{cell_text, normalize_currency, parse_value};

/// Level letters a positioning table may have columns for.
pub const LEVEL_LETTERS: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

/// Why a positioning table was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRejection {
    /// No positioning rows were supplied.
    Empty,
    /// A mapped column could not be found in the headers.
    MissingColumn(&'static str),
    /// Fewer level columns than the policy requires.
    TooFewLevelColumns {
        /// Level columns found.
        found: usize,
        /// Level columns required.
        required: usize,
    },
}

impl fmt::Display for TableRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRejection::Empty => write!(f, "positioning table has no rows"),
            TableRejection::MissingColumn(field) => {
                write!(f, "positioning table has no '{}' column", field)
            }
            TableRejection::TooFewLevelColumns { found, required } => write!(
                f,
                "positioning table has {} level columns, at least {} required",
                found, required
            ),
        }
    }
}

/// Parses positioning rows into a lookup table.
///
/// Level columns are headers that are exactly one letter A-J, ignoring case
/// and padding. Rows with an empty group or an unparseable positioning are
/// dropped and counted; cells that do not parse leave their level out of
/// the entry.
pub fn parse_positioning_table(
    rows: &[RawRow],
    mapping: &PositioningFieldMapping,
    policy: &BandPolicy,
) -> Result<PositioningTable, TableRejection> {
    if rows.is_empty() {
        return Err(TableRejection::Empty);
    }

    let headers = collect_headers(rows);
    let group_column =
        resolve_column(&headers, &mapping.group).ok_or(TableRejection::MissingColumn("group"))?;
    let currency_column = resolve_column(&headers, &mapping.currency)
        .ok_or(TableRejection::MissingColumn("currency"))?;
    let positioning_column = resolve_column(&headers, &mapping.positioning)
        .ok_or(TableRejection::MissingColumn("positioning"))?;

    let level_columns: Vec<(&str, &String)> = LEVEL_LETTERS
        .iter()
        .filter_map(|letter| {
            headers
                .iter()
                .find(|h| h.trim().eq_ignore_ascii_case(letter))
                .map(|h| (*letter, h))
        })
        .collect();

    let required = policy.positioning.min_level_columns;
    if level_columns.len() < required {
        return Err(TableRejection::TooFewLevelColumns {
            found: level_columns.len(),
            required,
        });
    }

    let mut table = PositioningTable::new(
        level_columns
            .iter()
            .map(|(letter, _)| letter.to_string())
            .collect(),
    );

    for row in rows {
        let group = cell_text(cell(row, Some(&group_column)));
        let positioning = parse_value(cell(row, Some(&positioning_column)));

        let Some(positioning) = positioning.filter(|_| !group.is_empty()) else {
            table.record_skipped_row();
            continue;
        };

        let currency = normalize_currency(
            &cell_text(cell(row, Some(&currency_column))),
            &policy.default_currency,
        );

        let levels: BTreeMap<String, _> = level_columns
            .iter()
            .filter_map(|(letter, header)| {
                parse_value(cell(row, Some(header.as_str()))).map(|v| (letter.to_string(), v))
            })
            .collect();

        table.insert(PositioningEntry {
            group,
            currency,
            positioning,
            levels,
        });
    }

    debug!(
        entries = table.len(),
        groups = table.groups().len(),
        skipped_rows = table.skipped_rows(),
        "Positioning table parsed"
    );

    Ok(table)
}
