//! Request types for the Compa-Ratio Band Engine API.
//!
//! This module defines the JSON request structure for the `/compute` endpoint.

use serde::{Deserialize, Serialize};

use crate::calculation::ImportInput;
use crate::config::FieldMapping;
use crate::ingest::RawRow;

/// Request body for the `/compute` endpoint.
///
/// Carries the rows read from a roster and, optionally, a positioning table.
/// A `field_mapping` replaces the server's mapping for this request only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// Roster rows, one object per employee.
    pub employees: Vec<RawRow>,
    /// Positioning table rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positioning: Option<Vec<RawRow>>,
    /// Name of the source the rows came from (e.g. the uploaded file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    /// Per-request field mapping override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_mapping: Option<FieldMapping>,
}

impl ComputeRequest {
    /// Splits the request into the import rows and the mapping override.
    pub fn into_parts(self) -> (ImportInput, Option<FieldMapping>) {
        let input = ImportInput {
            employees: self.employees,
            positioning: self.positioning,
            source_name: self.source_name,
        };
        (input, self.field_mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_compute_request() {
        let json = r#"{
            "employees": [
                {"Employee Name": "Ana Souza", "Level": "C", "Base Salary": "10.000,00"}
            ],
            "positioning": [
                {"Job Family": "Hearing Care", "Currency": "BRL", "Pay Positioning": 100, "C": 10000}
            ],
            "source_name": "roster.xlsx"
        }"#;

        let request: ComputeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employees.len(), 1);
        assert_eq!(request.employees[0]["Level"], "C");
        assert_eq!(request.positioning.as_ref().map(Vec::len), Some(1));
        assert_eq!(request.source_name.as_deref(), Some("roster.xlsx"));
        assert!(request.field_mapping.is_none());
    }

    #[test]
    fn test_optional_fields_default() {
        let request: ComputeRequest = serde_json::from_str(r#"{"employees": []}"#).unwrap();
        assert!(request.positioning.is_none());
        assert!(request.source_name.is_none());
    }

    #[test]
    fn test_missing_employees_is_an_error() {
        let result: Result<ComputeRequest, _> = serde_json::from_str(r#"{"positioning": []}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing field `employees`"));
    }

    #[test]
    fn test_partial_field_mapping_keeps_defaults() {
        let json = r#"{
            "employees": [],
            "field_mapping": {"employees": {"salary": ["Monthly Pay"]}}
        }"#;

        let request: ComputeRequest = serde_json::from_str(json).unwrap();
        let (input, mapping) = request.into_parts();
        let mapping = mapping.unwrap();

        assert!(input.employees.is_empty());
        assert_eq!(mapping.employees.salary, vec!["Monthly Pay"]);
        assert_eq!(mapping.positioning, FieldMapping::default().positioning);
    }
}
