//! Computed salary band model.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a band's boundaries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandSource {
    /// Read from the positioning table.
    Table,
    /// P20/P50/P80 of a large enough peer sample.
    EstimatedPercentile,
    /// Fixed ratios around the median of a small peer sample.
    EstimatedRatio,
}

impl BandSource {
    /// Returns true for both estimation strategies.
    pub fn is_estimated(self) -> bool {
        matches!(self, BandSource::EstimatedPercentile | BandSource::EstimatedRatio)
    }
}

/// Lookup key of a computed band, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BandKey {
    group: String,
    currency: String,
    level: String,
}

impl BandKey {
    /// Builds a normalized key.
    pub fn new(group: &str, currency: &str, level: &str) -> Self {
        Self {
            group: group.trim().to_uppercase(),
            currency: currency.trim().to_uppercase(),
            level: level.trim().to_uppercase(),
        }
    }
}

/// Bands of one source, keyed by (group, currency, level).
pub type BandMap = BTreeMap<BandKey, ComputedBand>;

/// A resolved salary band for one (group, currency, level) combination.
///
/// # Example
///
/// ```
/// use compa_engine::models::{BandSource, ComputedBand};
/// use rust_decimal::Decimal;
///
/// let band = ComputedBand {
///     group: "Sales".to_string(),
///     currency: "BRL".to_string(),
///     level: "C".to_string(),
///     p80: Some(Decimal::new(8_000, 0)),
///     p100: Some(Decimal::new(10_000, 0)),
///     p120: Some(Decimal::new(12_000, 0)),
///     sample_size: 0,
///     source: BandSource::Table,
/// };
/// assert!(band.has_range());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedBand {
    /// Group label.
    pub group: String,
    /// Currency code.
    pub currency: String,
    /// Level letter, or the no-level sentinel.
    pub level: String,
    /// Lower bound.
    pub p80: Option<Decimal>,
    /// Midpoint.
    pub p100: Option<Decimal>,
    /// Upper bound.
    pub p120: Option<Decimal>,
    /// Number of peer salaries behind an estimate; 0 for table bands.
    pub sample_size: usize,
    /// Provenance.
    pub source: BandSource,
}

impl ComputedBand {
    /// The key this band is stored under.
    pub fn key(&self) -> BandKey {
        BandKey::new(&self.group, &self.currency, &self.level)
    }

    /// Returns true if both range bounds are known.
    pub fn has_range(&self) -> bool {
        self.p80.is_some() && self.p120.is_some()
    }
}
