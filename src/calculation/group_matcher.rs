//! Group matching against positioning table labels.
//!
//! Roster group labels rarely match the positioning table exactly. The
//! matcher maps an employee's nominal group onto a table group with a fixed
//! fallback order:
//!
//! 1. case-insensitive exact match on the nominal group;
//! 2. the configured family group, when the job family contains the
//!    configured keyword;
//! 3. the first table group containing the catch-all fragment, for any
//!    family, keyword families included;
//! 4. the nominal group unchanged.

use crate::config::GroupFallback;

/// Resolves the group an employee's band is looked up under.
///
/// Returns the table's own spelling of the label whenever a table group is
/// chosen. With no table groups the nominal group is always returned.
///
/// # Examples
///
/// ```
/// use compa_engine::calculation::match_group;
/// use compa_engine::config::GroupFallback;
///
/// let groups = vec!["Hearing Care".to_string(), "All Families".to_string()];
/// let matched = match_group(
///     "Retail",
///     "Hearing Instrument Specialist",
///     &groups,
///     &GroupFallback::default(),
/// );
/// assert_eq!(matched, "Hearing Care");
/// ```
pub fn match_group(
    nominal: &str,
    job_family: &str,
    groups: &[String],
    fallback: &GroupFallback,
) -> String {
    let wanted = nominal.trim().to_lowercase();
    if let Some(exact) = groups.iter().find(|g| g.trim().to_lowercase() == wanted) {
        return exact.clone();
    }

    let keyword = fallback.family_keyword.trim().to_lowercase();
    if !keyword.is_empty() && job_family.to_lowercase().contains(&keyword) {
        let family_group = fallback.family_group.trim().to_lowercase();
        if let Some(group) = groups
            .iter()
            .find(|g| g.trim().to_lowercase() == family_group)
        {
            return group.clone();
        }
    }

    // Keyword families fall through here too when the table has no family group.
    let fragment = fallback.catch_all_fragment.trim().to_lowercase();
    if !fragment.is_empty() {
        if let Some(group) = groups.iter().find(|g| g.to_lowercase().contains(&fragment)) {
            return group.clone();
        }
    }

    nominal.to_string()
}
