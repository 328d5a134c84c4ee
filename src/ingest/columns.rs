//! Column resolution against declared field mappings.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// A raw row from the tabular source reader.
pub type RawRow = Map<String, Value>;

static NULL: Value = Value::Null;

/// Returns every header that appears in at least one row, sorted.
pub fn collect_headers(rows: &[RawRow]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Picks the header for a field from its candidate names.
///
/// Candidates are tried in order for an exact match first; if none matches
/// exactly, they are tried again ignoring case and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use compa_engine::ingest::resolve_column;
///
/// let headers = vec!["base salary".to_string(), "Salary".to_string()];
/// let candidates = vec!["Base Salary".to_string(), "Salary".to_string()];
/// assert_eq!(resolve_column(&headers, &candidates), Some("Salary".to_string()));
/// ```
pub fn resolve_column(headers: &[String], candidates: &[String]) -> Option<String> {
    let candidates: Vec<&str> = candidates
        .iter()
        .map(|c| c.as_str())
        .filter(|c| !c.trim().is_empty())
        .collect();

    candidates
        .iter()
        .find_map(|candidate| headers.iter().find(|h| h.as_str() == *candidate))
        .or_else(|| {
            candidates.iter().find_map(|candidate| {
                let wanted = candidate.trim().to_lowercase();
                headers.iter().find(|h| h.trim().to_lowercase() == wanted)
            })
        })
        .cloned()
}

/// Reads a cell, treating a missing column as `null`.
pub fn cell<'a>(row: &'a RawRow, column: Option<&str>) -> &'a Value {
    column.and_then(|c| row.get(c)).unwrap_or(&NULL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn row(value: Value) -> RawRow {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_collect_headers_unions_rows() {
        let rows = vec![
            row(json!({"Name": "Ana", "Salary": 1})),
            row(json!({"Name": "Bia", "Currency": "BRL"})),
        ];
        assert_eq!(
            collect_headers(&rows),
            strings(&["Currency", "Name", "Salary"])
        );
    }

    #[test]
    fn test_exact_match_preferred_over_case_insensitive() {
        let headers = strings(&["LEVEL", "Position Level"]);
        let candidates = strings(&["Level", "Position Level"]);
        assert_eq!(
            resolve_column(&headers, &candidates),
            Some("Position Level".to_string())
        );
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let headers = strings(&[" currency "]);
        let candidates = strings(&["Currency"]);
        assert_eq!(
            resolve_column(&headers, &candidates),
            Some(" currency ".to_string())
        );
    }

    #[test]
    fn test_candidate_order_respected() {
        let headers = strings(&["Salary", "Base Salary"]);
        let candidates = strings(&["Base Salary", "Salary"]);
        assert_eq!(
            resolve_column(&headers, &candidates),
            Some("Base Salary".to_string())
        );
    }

    #[test]
    fn test_unresolved_and_blank_candidates() {
        let headers = strings(&["Name"]);
        assert_eq!(resolve_column(&headers, &strings(&["Salary"])), None);
        assert_eq!(resolve_column(&headers, &strings(&["", "  "])), None);
    }

    #[test]
    fn test_cell_missing_column_is_null() {
        let r = row(json!({"Name": "Ana"}));
        assert_eq!(cell(&r, Some("Name")), &json!("Ana"));
        assert!(cell(&r, Some("Salary")).is_null());
        assert!(cell(&r, None).is_null());
    }
}
