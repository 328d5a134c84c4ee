//! Employee record model.
//!
//! An [`EmployeeRecord`] is one roster row after field mapping and
//! normalization. Records are immutable once ingested.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Group label used when a record has neither a pay band nor a job family.
pub const NO_GROUP: &str = "No group";

/// Level key used when a record has no recognizable level letter.
pub const NO_LEVEL: &str = "No level";

/// A pass-through value from a roster column the engine does not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    /// The cell parsed as a number.
    Number(Decimal),
    /// Anything else, trimmed.
    Text(String),
}

/// An employee compensation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// 1-based position of the row in the source roster.
    pub row_index: usize,
    /// Employee identifier (may be empty).
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Job family label (may be empty).
    pub job_family: String,
    /// Pay band label (may be empty).
    pub pay_band: String,
    /// The level text as it appeared in the roster.
    pub level_raw: String,
    /// Normalized level letter A-J, or empty.
    pub level_letter: String,
    /// Upper-cased currency code.
    pub currency: String,
    /// Base salary, never negative.
    pub base_salary: Decimal,
    /// Columns outside the field mapping, keyed by header.
    #[serde(default)]
    pub extras: BTreeMap<String, ExtraValue>,
}

impl EmployeeRecord {
    /// Returns the label used to group this employee with peers: the pay
    /// band, else the job family, else [`NO_GROUP`].
    ///
    /// # Examples
    ///
    /// ```
    /// use compa_engine::models::{EmployeeRecord, NO_GROUP};
    /// use rust_decimal::Decimal;
    ///
    /// let mut record = EmployeeRecord {
    ///     row_index: 1,
    ///     employee_id: "E1".to_string(),
    ///     employee_name: "Ana Souza".to_string(),
    ///     job_family: "Sales".to_string(),
    ///     pay_band: String::new(),
    ///     level_raw: "C".to_string(),
    ///     level_letter: "C".to_string(),
    ///     currency: "BRL".to_string(),
    ///     base_salary: Decimal::new(10_000, 0),
    ///     extras: Default::default(),
    /// };
    /// assert_eq!(record.nominal_group(), "Sales");
    ///
    /// record.job_family.clear();
    /// assert_eq!(record.nominal_group(), NO_GROUP);
    /// ```
    pub fn nominal_group(&self) -> &str {
        if !self.pay_band.is_empty() {
            &self.pay_band
        } else if !self.job_family.is_empty() {
            &self.job_family
        } else {
            NO_GROUP
        }
    }

    /// Returns the level letter, or [`NO_LEVEL`] when there is none.
    pub fn level_key(&self) -> &str {
        if self.level_letter.is_empty() {
            NO_LEVEL
        } else {
            &self.level_letter
        }
    }

    /// Returns true if a level letter was recognized.
    pub fn has_level(&self) -> bool {
        !self.level_letter.is_empty()
    }
}
