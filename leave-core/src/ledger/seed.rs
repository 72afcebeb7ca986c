//! Seed data loaded into the ledger at process start
//!
//! The JSON shape is a map from employee id to record:
//!
//! ```json
//! {
//!   "E001": { "balance": 18, "history": ["2024-12-25", "2025-01-01"] },
//!   "E002": { "balance": 20, "history": [] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::LeaveRecord;
use crate::error::{LedgerError, Result};

/// Initial state of a single employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub balance: u32,
    #[serde(default)]
    pub history: Vec<String>,
}

/// Initial state of the whole ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedData {
    records: BTreeMap<String, SeedRecord>,
}

impl SeedData {
    /// Empty seed (no employees)
    pub fn new() -> Self {
        Self::default()
    }

    /// The two reference employees every fresh service starts with
    pub fn reference() -> Self {
        Self::new()
            .with_record(
                "E001",
                18,
                vec!["2024-12-25".to_string(), "2025-01-01".to_string()],
            )
            .with_record("E002", 20, Vec::new())
    }

    /// Add or replace one employee
    pub fn with_record(mut self, employee_id: &str, balance: u32, history: Vec<String>) -> Self {
        self.records
            .insert(employee_id.to_string(), SeedRecord { balance, history });
        self
    }

    /// Parse seed data from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Read and parse a JSON seed file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LedgerError::SeedLoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// Number of employees in the seed
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert into ledger records, ordered by employee id
    pub fn into_records(self) -> Vec<LeaveRecord> {
        self.records
            .into_iter()
            .map(|(employee_id, seed)| LeaveRecord::new(employee_id, seed.balance, seed.history))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.records.keys().any(|id| id.trim().is_empty()) {
            return Err(LedgerError::InvalidSeed {
                reason: "employee id must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_seed() {
        let records = SeedData::reference().into_records();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].employee_id, "E001");
        assert_eq!(records[0].balance, 18);
        assert_eq!(records[0].history, vec!["2024-12-25", "2025-01-01"]);

        assert_eq!(records[1].employee_id, "E002");
        assert_eq!(records[1].balance, 20);
        assert!(records[1].history.is_empty());
    }

    #[test]
    fn test_from_json_str() {
        let seed = SeedData::from_json_str(
            r#"{"E100": {"balance": 5, "history": ["2025-02-14"]}, "E101": {"balance": 0}}"#,
        )
        .unwrap();

        assert_eq!(seed.len(), 2);
        let records = seed.into_records();
        assert_eq!(records[0].history, vec!["2025-02-14"]);
        assert!(records[1].history.is_empty());
    }

    #[test]
    fn test_negative_balance_rejected() {
        let result = SeedData::from_json_str(r#"{"E100": {"balance": -1}}"#);
        assert!(matches!(result, Err(LedgerError::InvalidSeed { .. })));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = SeedData::from_json_str(r#"{" ": {"balance": 1}}"#);
        assert!(matches!(result, Err(LedgerError::InvalidSeed { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = SeedData::from_file("/nonexistent/leave-seed.json");
        assert!(matches!(result, Err(LedgerError::SeedLoadError { .. })));
    }
}
