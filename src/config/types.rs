//! Configuration types for band resolution.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a configuration directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata identifying the engine configuration in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of this configuration.
    pub name: String,
    /// Version or effective date of the configuration.
    pub version: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "Default compa-ratio policy".to_string(),
            version: "builtin".to_string(),
        }
    }
}

/// Controls how bands are estimated from peer salaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationPolicy {
    /// Smallest peer sample that uses P20/P50/P80 instead of fixed ratios.
    pub min_percentile_sample: usize,
    /// Multiplier applied to P100 to derive P80 for small samples.
    pub lower_ratio: Decimal,
    /// Multiplier applied to P100 to derive P120 for small samples.
    pub upper_ratio: Decimal,
}

impl Default for EstimationPolicy {
    fn default() -> Self {
        Self {
            min_percentile_sample: 5,
            lower_ratio: Decimal::new(80, 2),
            upper_ratio: Decimal::new(120, 2),
        }
    }
}

/// Acceptance rules for a positioning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositioningPolicy {
    /// Minimum number of level columns (A-J) for the table to be usable.
    pub min_level_columns: usize,
}

impl Default for PositioningPolicy {
    fn default() -> Self {
        Self {
            min_level_columns: 6,
        }
    }
}

/// Last-resort group mapping used when an employee's group is not in the
/// positioning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupFallback {
    /// Substring searched (case-insensitively) in the employee's job family.
    pub family_keyword: String,
    /// Table group used when the keyword is found.
    pub family_group: String,
    /// Fragment identifying a catch-all table group.
    pub catch_all_fragment: String,
}

impl Default for GroupFallback {
    fn default() -> Self {
        Self {
            family_keyword: "hearing".to_string(),
            family_group: "hearing care".to_string(),
            catch_all_fragment: "all families".to_string(),
        }
    }
}

/// The band resolution policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandPolicy {
    /// Currency assumed when a record carries none.
    pub default_currency: String,
    /// Peer estimation settings.
    pub estimation: EstimationPolicy,
    /// Positioning table acceptance settings.
    pub positioning: PositioningPolicy,
    /// Group fallback settings.
    pub group_fallback: GroupFallback,
    /// Whether employees without a level letter may match the estimated
    /// band of their level-less peers.
    pub match_unlevelled: bool,
}

impl Default for BandPolicy {
    fn default() -> Self {
        Self {
            default_currency: "BRL".to_string(),
            estimation: EstimationPolicy::default(),
            positioning: PositioningPolicy::default(),
            group_fallback: GroupFallback::default(),
            match_unlevelled: true,
        }
    }
}

impl BandPolicy {
    /// Checks the policy for values the engine cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.default_currency.trim().is_empty() {
            return Err(invalid("default_currency", "must not be empty"));
        }
        if self.estimation.min_percentile_sample == 0 {
            return Err(invalid(
                "estimation.min_percentile_sample",
                "must be at least 1",
            ));
        }
        if self.estimation.lower_ratio <= Decimal::ZERO {
            return Err(invalid(
                "estimation.lower_ratio",
                "must be greater than zero",
            ));
        }
        if self.estimation.upper_ratio <= self.estimation.lower_ratio {
            return Err(invalid(
                "estimation.upper_ratio",
                "must be greater than estimation.lower_ratio",
            ));
        }
        if !(1..=10).contains(&self.positioning.min_level_columns) {
            return Err(invalid(
                "positioning.min_level_columns",
                "must be between 1 and 10",
            ));
        }
        Ok(())
    }
}

/// Structure of `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Configuration metadata.
    pub engine: EngineMetadata,
    /// Band resolution policy.
    #[serde(default)]
    pub policy: BandPolicy,
}

/// Candidate column names for each semantic employee field.
///
/// Candidates are tried in order; the first one present in the roster
/// headers (exact match first, then case-insensitive) is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeFieldMapping {
    /// Employee identifier.
    pub employee_id: Vec<String>,
    /// Given name, used when no full-name column exists.
    pub first_name: Vec<String>,
    /// Family name, used when no full-name column exists.
    pub last_name: Vec<String>,
    /// Full display name.
    pub employee_name: Vec<String>,
    /// Job family label.
    pub job_family: Vec<String>,
    /// Pay band label.
    pub pay_band: Vec<String>,
    /// Free-text level.
    pub level: Vec<String>,
    /// Currency code.
    pub currency: Vec<String>,
    /// Base salary.
    pub salary: Vec<String>,
}

impl Default for EmployeeFieldMapping {
    fn default() -> Self {
        Self {
            employee_id: names(&["Sonova ID", "Employee ID", "ID", "Matrícula", "Matricula"]),
            first_name: names(&["First Name", "Primeiro Nome"]),
            last_name: names(&["Last Name", "Sobrenome"]),
            employee_name: names(&["Employee Name", "Name", "Nome"]),
            job_family: names(&[
                "Position Role Family (externalName)",
                "Position Role Family",
                "Job Family",
                "Family",
            ]),
            pay_band: names(&["Pay Band", "Banda", "Band"]),
            level: names(&["Position Sonova Level", "Sonova Level", "Position Level", "Level"]),
            currency: names(&["Currency", "Moeda"]),
            salary: names(&[
                "Base Salary 100%",
                "Base Salary",
                "Salary",
                "Salário",
                "Salario",
            ]),
        }
    }
}

/// Candidate column names for the positioning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositioningFieldMapping {
    /// Group label.
    pub group: Vec<String>,
    /// Currency code.
    pub currency: Vec<String>,
    /// Positioning percent (80/100/120).
    pub positioning: Vec<String>,
}

impl Default for PositioningFieldMapping {
    fn default() -> Self {
        Self {
            group: names(&["Job Family", "Family", "Grupo", "Group"]),
            currency: names(&["Currency", "Moeda"]),
            positioning: names(&["Pay Positioning", "Positioning"]),
        }
    }
}

/// The declarative field mapping, structure of `mapping.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Roster columns.
    pub employees: EmployeeFieldMapping,
    /// Positioning table columns.
    pub positioning: PositioningFieldMapping,
}

impl FieldMapping {
    /// Checks that the fields the engine cannot do without have candidates.
    pub fn validate(&self) -> EngineResult<()> {
        let required = [
            ("employees.salary", &self.employees.salary),
            ("positioning.group", &self.positioning.group),
            ("positioning.currency", &self.positioning.currency),
            ("positioning.positioning", &self.positioning.positioning),
        ];
        for (field, candidates) in required {
            if candidates.iter().all(|c| c.trim().is_empty()) {
                return Err(invalid(field, "at least one column name is required"));
            }
        }
        Ok(())
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    policy: BandPolicy,
    mapping: FieldMapping,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, policy: BandPolicy, mapping: FieldMapping) -> Self {
        Self {
            metadata,
            policy,
            mapping,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the band resolution policy.
    pub fn policy(&self) -> &BandPolicy {
        &self.policy
    }

    /// Returns the field mapping.
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Returns a copy of this configuration using a different field mapping.
    pub fn with_mapping(&self, mapping: FieldMapping) -> EngineResult<Self> {
        mapping.validate()?;
        Ok(Self {
            metadata: self.metadata.clone(),
            policy: self.policy.clone(),
            mapping,
        })
    }

    /// Validates policy and mapping together.
    pub fn validate(&self) -> EngineResult<()> {
        self.policy.validate()?;
        self.mapping.validate()
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}
