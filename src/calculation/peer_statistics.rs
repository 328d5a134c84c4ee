//! Band estimation from peer salaries.
//!
//! Employees sharing a (group, currency, level) key form a peer sample.
//! Large samples use the P20/P50/P80 percentiles as P80/P100/P120; small
//! samples are too noisy for that and use fixed ratios around the median.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::config::EstimationPolicy;
use crate::models::{BandKey, BandMap, BandSource, ComputedBand, EmployeeRecord};

/// Percentile used as the estimated lower bound.
pub const LOWER_PERCENTILE: u32 = 20;

/// Percentile used as the estimated midpoint.
pub const MID_PERCENTILE: u32 = 50;

/// Percentile used as the estimated upper bound.
pub const UPPER_PERCENTILE: u32 = 80;

/// Linear-interpolated percentile of an ascending sample.
///
/// The rank is `(n - 1) * pct / 100`; a fractional rank interpolates
/// between its two neighbours. `pct` above 100 is treated as 100.
/// Returns `None` for an empty sample or when the interpolation overflows.
///
/// # Examples
///
/// ```
/// use compa_engine::calculation::percentile;
/// use rust_decimal::Decimal;
///
/// let sample: Vec<Decimal> = [10, 20, 30, 40].iter().map(|v| Decimal::from(*v)).collect();
/// assert_eq!(percentile(&sample, 50), Some(Decimal::from(25)));
/// assert_eq!(percentile(&[], 50), None);
/// ```
pub fn percentile(sorted: &[Decimal], pct: u32) -> Option<Decimal> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let scaled_rank = (n - 1) * pct.min(100) as usize;
    let lo = scaled_rank / 100;
    let remainder = scaled_rank % 100;
    if remainder == 0 {
        return Some(sorted[lo]);
    }

    let weight = Decimal::new(remainder as i64, 2);
    let low = sorted[lo].checked_mul(Decimal::ONE - weight)?;
    let high = sorted[lo + 1].checked_mul(weight)?;
    low.checked_add(high)
}

/// Builds one band from an ascending, non-empty peer sample.
///
/// A bound whose ratio product overflows is left as `None`.
fn band_from_sample(
    group: String,
    currency: String,
    level: String,
    sorted: &[Decimal],
    policy: &EstimationPolicy,
) -> ComputedBand {
    let p100 = percentile(sorted, MID_PERCENTILE);

    let (p80, p120, source) = if sorted.len() >= policy.min_percentile_sample {
        (
            percentile(sorted, LOWER_PERCENTILE),
            percentile(sorted, UPPER_PERCENTILE),
            BandSource::EstimatedPercentile,
        )
    } else {
        (
            p100.and_then(|mid| mid.checked_mul(policy.lower_ratio)),
            p100.and_then(|mid| mid.checked_mul(policy.upper_ratio)),
            BandSource::EstimatedRatio,
        )
    };

    ComputedBand {
        group,
        currency,
        level,
        p80,
        p100,
        p120,
        sample_size: sorted.len(),
        source,
    }
}

/// Estimates a band for every peer group in the roster.
///
/// Peers are grouped by nominal group, currency and level key, compared
/// case-insensitively; the labels of the first member are kept.
pub fn estimate_bands(employees: &[EmployeeRecord], policy: &EstimationPolicy) -> BandMap {
    struct Sample {
        group: String,
        currency: String,
        level: String,
        salaries: Vec<Decimal>,
    }

    let mut samples: BTreeMap<BandKey, Sample> = BTreeMap::new();
    for employee in employees {
        let group = employee.nominal_group();
        let level = employee.level_key();
        samples
            .entry(BandKey::new(group, &employee.currency, level))
            .or_insert_with(|| Sample {
                group: group.to_string(),
                currency: employee.currency.clone(),
                level: level.to_string(),
                salaries: Vec::new(),
            })
            .salaries
            .push(employee.base_salary);
    }

    samples
        .into_iter()
        .map(|(key, mut sample)| {
            sample.salaries.sort();
            let band = band_from_sample(
                sample.group,
                sample.currency,
                sample.level,
                &sample.salaries,
                policy,
            );
            (key, band)
        })
        .collect()
}
