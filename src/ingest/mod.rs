//! Roster and positioning row ingestion.
//!
//! Raw rows arrive as field-name-to-value maps. This module resolves the
//! declared field mapping against their headers and builds employee
//! records from the roster.

mod columns;
mod roster;

pub use columns::{RawRow, cell, collect_headers, resolve_column};
pub use roster::{
    NEGATIVE_SALARY, ROWS_WITHOUT_SALARY, ResolvedColumns, Roster, SALARY_COLUMN_MISSING,
    ingest_roster,
};
