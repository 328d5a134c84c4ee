//! Band resolution and compa-ratio calculation.
//!
//! Every employee is looked up under (matched group, currency, level key)
//! in two layers: bands read from the positioning table first, bands
//! estimated from peer salaries second. The resolved band then yields the
//! compa-ratio and the status of the salary against the band.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::BandPolicy;
use crate::models::{
    BandKey, BandMap, BandSource, BandStatus, ComputedBand, EmployeeRecord,
    POSITIONING_HIGH, POSITIONING_LOW, POSITIONING_MID, PositioningTable, ResultRow,
};

use super::group_matcher::match_group;
use super::peer_statistics::estimate_bands;

/// Builds bands from the positioning table for the employees of a roster.
///
/// Only employees with a level letter are considered. A band is created
/// when the table has a P100 value for the employee's matched group,
/// currency and level; P80 and P120 are filled in when present. The first
/// band built for a key wins.
pub fn build_table_bands(
    employees: &[EmployeeRecord],
    table: &PositioningTable,
    policy: &BandPolicy,
) -> BandMap {
    let mut bands = BandMap::new();

    for employee in employees.iter().filter(|e| e.has_level()) {
        let group = match_group(
            employee.nominal_group(),
            &employee.job_family,
            table.groups(),
            &policy.group_fallback,
        );
        let level = employee.level_letter.as_str();
        let key = BandKey::new(&group, &employee.currency, level);
        if bands.contains_key(&key) {
            continue;
        }

        let Some(p100) = table.boundary(&group, &employee.currency, POSITIONING_MID, level) else {
            continue;
        };

        bands.insert(
            key,
            ComputedBand {
                p80: table.boundary(&group, &employee.currency, POSITIONING_LOW, level),
                p100: Some(p100),
                p120: table.boundary(&group, &employee.currency, POSITIONING_HIGH, level),
                group,
                currency: employee.currency.clone(),
                level: level.to_string(),
                sample_size: 0,
                source: BandSource::Table,
            },
        );
    }

    bands
}

/// Two band layers queried in priority order.
#[derive(Debug, Clone, Copy)]
pub struct BandLookup<'a> {
    table: &'a BandMap,
    estimated: &'a BandMap,
}

impl<'a> BandLookup<'a> {
    /// Combines the table layer with the estimated layer.
    pub fn new(table: &'a BandMap, estimated: &'a BandMap) -> Self {
        Self { table, estimated }
    }

    /// Returns the table band for a key, else the estimated one.
    pub fn get(&self, group: &str, currency: &str, level: &str) -> Option<&'a ComputedBand> {
        let key = BandKey::new(group, currency, level);
        self.table.get(&key).or_else(|| self.estimated.get(&key))
    }
}

/// Compa-ratio and status of a salary against an optional band.
///
/// A band with both bounds classifies the salary with inclusive bounds. A
/// band with only a midpoint yields [`BandStatus::MissingRangeBounds`]. The
/// compa-ratio is never produced from a zero midpoint.
///
/// # Examples
///
/// ```
/// use compa_engine::calculation::classify;
/// use compa_engine::models::{BandSource, BandStatus, ComputedBand};
/// use rust_decimal::Decimal;
///
/// let band = ComputedBand {
///     group: "Sales".to_string(),
///     currency: "BRL".to_string(),
///     level: "C".to_string(),
///     p80: Some(Decimal::from(8000)),
///     p100: Some(Decimal::from(10000)),
///     p120: Some(Decimal::from(12000)),
///     sample_size: 0,
///     source: BandSource::Table,
/// };
///
/// let (compa, status) = classify(Decimal::from(11000), Some(&band));
/// assert_eq!(compa, Some(Decimal::new(11, 1)));
/// assert_eq!(status, BandStatus::Within);
/// ```
pub fn classify(salary: Decimal, band: Option<&ComputedBand>) -> (Option<Decimal>, BandStatus) {
    let Some(band) = band else {
        return (None, BandStatus::NoBand);
    };

    let compa = band
        .p100
        .filter(|mid| !mid.is_zero())
        .and_then(|mid| salary.checked_div(mid));

    match (band.p80, band.p120) {
        (Some(p80), Some(p120)) => {
            let status = if salary < p80 {
                BandStatus::Below
            } else if salary > p120 {
                BandStatus::Above
            } else {
                BandStatus::Within
            };
            (compa, status)
        }
        _ if band.p100.is_some() => (compa, BandStatus::MissingRangeBounds),
        _ => (None, BandStatus::NoBand),
    }
}

/// Joins an employee with the band resolved for them.
pub fn resolve_row(
    employee: &EmployeeRecord,
    group: String,
    band: Option<&ComputedBand>,
) -> ResultRow {
    let (compa, status) = classify(employee.base_salary, band);
    let band = band.filter(|_| status != BandStatus::NoBand);

    ResultRow {
        row_index: employee.row_index,
        employee_id: employee.employee_id.clone(),
        employee_name: employee.employee_name.clone(),
        job_family: employee.job_family.clone(),
        pay_band: employee.pay_band.clone(),
        level: employee.level_raw.clone(),
        level_letter: employee.level_letter.clone(),
        currency: employee.currency.clone(),
        base_salary: employee.base_salary,
        group,
        p80: band.and_then(|b| b.p80),
        p100: band.and_then(|b| b.p100),
        p120: band.and_then(|b| b.p120),
        compa,
        status,
        band_source: band.map(|b| b.source),
        band_sample_size: band.map(|b| b.sample_size),
        extras: employee.extras.clone(),
    }
}

/// Everything band resolution produced for a roster.
#[derive(Debug, Clone, Default)]
pub struct BandResolution {
    /// One row per employee, in roster order.
    pub rows: Vec<ResultRow>,
    /// Bands read from the positioning table.
    pub table_bands: BandMap,
    /// Bands estimated from peer salaries.
    pub estimated_bands: BandMap,
}

/// Resolves a band and status for every employee of a roster.
///
/// Without a positioning table every band is estimated and the nominal
/// group is used as is. Employees without a level letter only match the
/// level-less estimated band of their peers when
/// [`BandPolicy::match_unlevelled`] is set.
pub fn resolve_bands(
    employees: &[EmployeeRecord],
    table: Option<&PositioningTable>,
    policy: &BandPolicy,
) -> BandResolution {
    let table_bands = table
        .map(|t| build_table_bands(employees, t, policy))
        .unwrap_or_default();
    let estimated_bands = estimate_bands(employees, &policy.estimation);
    let groups = table.map(|t| t.groups()).unwrap_or_default();

    let lookup = BandLookup::new(&table_bands, &estimated_bands);
    let rows = employees
        .iter()
        .map(|employee| {
            let group = match_group(
                employee.nominal_group(),
                &employee.job_family,
                groups,
                &policy.group_fallback,
            );
            let band = if employee.has_level() || policy.match_unlevelled {
                lookup.get(&group, &employee.currency, employee.level_key())
            } else {
                None
            };
            resolve_row(employee, group, band)
        })
        .collect();

    debug!(
        employees = employees.len(),
        table_bands = table_bands.len(),
        estimated_bands = estimated_bands.len(),
        "Bands resolved"
    );

    BandResolution {
        rows,
        table_bands,
        estimated_bands,
    }
}
