//! Batch summary over result rows.

use rust_decimal::Decimal;

use crate::models::{BandStatus, GroupBelowCount, ImportSummary, ResultRow};

/// Maximum number of groups listed in [`ImportSummary::top_groups_below`].
pub const TOP_GROUPS_LIMIT: usize = 5;

/// Aggregates status counts, provenance counts and the average compa-ratio.
///
/// Groups are the matched groups of the rows. Only groups with at least one
/// below-band employee are ranked; ties keep the order in which the groups
/// first appear. The average is `None` when no row has a compa-ratio or
/// when their sum overflows.
pub fn summarize(rows: &[ResultRow]) -> ImportSummary {
    let mut summary = ImportSummary {
        total: rows.len(),
        below: 0,
        within: 0,
        above: 0,
        missing_range_bounds: 0,
        no_band: 0,
        table_sourced: 0,
        estimated: 0,
        average_compa: None,
        top_groups_below: Vec::new(),
    };

    let mut groups: Vec<GroupBelowCount> = Vec::new();
    let mut compa_total = Some(Decimal::ZERO);
    let mut compa_count: u32 = 0;

    for row in rows {
        match row.status {
            BandStatus::Below => summary.below += 1,
            BandStatus::Within => summary.within += 1,
            BandStatus::Above => summary.above += 1,
            BandStatus::MissingRangeBounds => summary.missing_range_bounds += 1,
            BandStatus::NoBand => summary.no_band += 1,
        }

        match row.band_source {
            Some(source) if source.is_estimated() => summary.estimated += 1,
            Some(_) => summary.table_sourced += 1,
            None => {}
        }

        if let Some(compa) = row.compa {
            compa_total = compa_total.and_then(|total| total.checked_add(compa));
            compa_count += 1;
        }

        let index = match groups.iter().position(|g| g.group == row.group) {
            Some(index) => index,
            None => {
                groups.push(GroupBelowCount {
                    group: row.group.clone(),
                    below: 0,
                    total: 0,
                });
                groups.len() - 1
            }
        };
        groups[index].total += 1;
        if row.status == BandStatus::Below {
            groups[index].below += 1;
        }
    }

    if compa_count > 0 {
        summary.average_compa =
            compa_total.and_then(|total| total.checked_div(Decimal::from(compa_count)));
    }

    groups.retain(|g| g.below > 0);
    // Stable sort keeps first-seen order among ties.
    groups.sort_by(|a, b| b.below.cmp(&a.below));
    groups.truncate(TOP_GROUPS_LIMIT);
    summary.top_groups_below = groups;

    summary
}
