//! Calculation logic for the Compa-Ratio Band Engine.
//!
//! This module contains field normalization, peer band estimation,
//! positioning table parsing, group matching, band resolution with
//! compa-ratio classification, the batch summary, and the import
//! orchestrator that runs them in order.

mod band_resolver;
mod group_matcher;
mod import;
mod normalize;
mod peer_statistics;
mod positioning_table;
mod summary;

pub use band_resolver::{
    BandLookup, BandResolution, build_table_bands, classify, resolve_bands, resolve_row,
};
pub use group_matcher::match_group;
pub use import::{
    BAND_INFO_ESTIMATED, BAND_INFO_TABLE, ImportInput, POSITIONING_REJECTED,
    POSITIONING_ROWS_SKIPPED, run_import,
};
pub use normalize::{cell_text, normalize_currency, normalize_level, parse_number, parse_value};
pub use peer_statistics::{
    LOWER_PERCENTILE, MID_PERCENTILE, UPPER_PERCENTILE, estimate_bands, percentile,
};
pub use positioning_table::{LEVEL_LETTERS, TableRejection, parse_positioning_table};
pub use summary::{TOP_GROUPS_LIMIT, summarize};
