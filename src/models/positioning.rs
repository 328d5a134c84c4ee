//! Positioning table models.
//!
//! A positioning table is the authoritative salary matrix: one row per
//! (group, currency, positioning percent) and one column per level letter.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Positioning percent of the band's lower bound.
pub const POSITIONING_LOW: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Positioning percent of the band's midpoint.
pub const POSITIONING_MID: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Positioning percent of the band's upper bound.
pub const POSITIONING_HIGH: Decimal = Decimal::from_parts(120, 0, 0, false, 0);

/// Lookup key of a positioning entry.
///
/// Group and currency are compared case-insensitively, the positioning
/// numerically (`80`, `80.0` and `"80,00"` are the same key).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositioningKey {
    group: String,
    currency: String,
    positioning: Decimal,
}

impl PositioningKey {
    /// Builds a normalized key.
    pub fn new(group: &str, currency: &str, positioning: Decimal) -> Self {
        Self {
            group: group.trim().to_uppercase(),
            currency: currency.trim().to_uppercase(),
            positioning: positioning.normalize(),
        }
    }
}

/// One row of the positioning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositioningEntry {
    /// Group label as written in the table.
    pub group: String,
    /// Upper-cased currency code.
    pub currency: String,
    /// Positioning percent, expected 80, 100 or 120.
    pub positioning: Decimal,
    /// Boundary salary per level letter. Levels whose cell did not parse
    /// are absent.
    pub levels: BTreeMap<String, Decimal>,
}

impl PositioningEntry {
    /// Returns the boundary value for a level letter.
    pub fn level_value(&self, level: &str) -> Option<Decimal> {
        self.levels.get(&level.to_uppercase()).copied()
    }
}

/// A parsed, accepted positioning table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositioningTable {
    entries: BTreeMap<PositioningKey, PositioningEntry>,
    groups: Vec<String>,
    level_columns: Vec<String>,
    skipped_rows: usize,
}

impl PositioningTable {
    /// Creates an empty table that recognizes the given level columns.
    pub fn new(level_columns: Vec<String>) -> Self {
        Self {
            level_columns,
            ..Self::default()
        }
    }

    /// Adds an entry, replacing any earlier entry with the same key. The
    /// group label is recorded the first time it is seen.
    pub fn insert(&mut self, entry: PositioningEntry) {
        if !self.groups.iter().any(|g| g == &entry.group) {
            self.groups.push(entry.group.clone());
        }
        let key = PositioningKey::new(&entry.group, &entry.currency, entry.positioning);
        self.entries.insert(key, entry);
    }

    /// Counts a row that was dropped during parsing.
    pub fn record_skipped_row(&mut self) {
        self.skipped_rows += 1;
    }

    /// Looks up the entry for a (group, currency, positioning) triple.
    pub fn get(&self, group: &str, currency: &str, positioning: Decimal) -> Option<&PositioningEntry> {
        self.entries
            .get(&PositioningKey::new(group, currency, positioning))
    }

    /// Returns the boundary value for a level at a positioning percent.
    pub fn boundary(
        &self,
        group: &str,
        currency: &str,
        positioning: Decimal,
        level: &str,
    ) -> Option<Decimal> {
        self.get(group, currency, positioning)
            .and_then(|entry| entry.level_value(level))
    }

    /// Distinct group labels, in the order first seen.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The level letters the table has columns for.
    pub fn level_columns(&self) -> &[String] {
        &self.level_columns
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry was stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows dropped for a missing group or positioning.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(group: &str, positioning: i64, c_value: i64) -> PositioningEntry {
        let mut levels = BTreeMap::new();
        levels.insert("C".to_string(), Decimal::new(c_value, 0));
        PositioningEntry {
            group: group.to_string(),
            currency: "BRL".to_string(),
            positioning: Decimal::new(positioning, 0),
            levels,
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut table = PositioningTable::new(vec!["C".to_string()]);
        table.insert(entry("Hearing Care", 100, 10_000));

        let found = table.get("hearing care", "brl", POSITIONING_MID);
        assert!(found.is_some());
        assert_eq!(
            table.boundary("HEARING CARE", "BRL", POSITIONING_MID, "c"),
            Some(Decimal::new(10_000, 0))
        );
    }

    #[test]
    fn test_positioning_compared_numerically() {
        let mut table = PositioningTable::new(vec![]);
        let mut e = entry("Sales", 0, 9_000);
        e.positioning = Decimal::new(8000, 2); // 80.00
        table.insert(e);

        assert!(table.get("Sales", "BRL", POSITIONING_LOW).is_some());
    }

    #[test]
    fn test_later_row_overwrites_earlier() {
        let mut table = PositioningTable::new(vec![]);
        table.insert(entry("Sales", 100, 10_000));
        table.insert(entry("SALES", 100, 11_000));

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.boundary("Sales", "BRL", POSITIONING_MID, "C"),
            Some(Decimal::new(11_000, 0))
        );
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let mut table = PositioningTable::new(vec![]);
        table.insert(entry("Sales", 80, 1));
        table.insert(entry("All Families", 80, 1));
        table.insert(entry("Sales", 100, 1));

        assert_eq!(table.groups(), &["Sales".to_string(), "All Families".to_string()]);
    }

    #[test]
    fn test_missing_level_returns_none() {
        let mut table = PositioningTable::new(vec![]);
        table.insert(entry("Sales", 100, 10_000));
        assert_eq!(table.boundary("Sales", "BRL", POSITIONING_MID, "D"), None);
        assert_eq!(table.boundary("Sales", "USD", POSITIONING_MID, "C"), None);
    }
}
