//! Ledger storage backend
//!
//! The ledger is shared by all sessions, so every method takes `&self` and
//! the in-memory backend guards its map with a single `RwLock`. Callers only
//! ever receive cloned snapshots of records.

use std::collections::HashMap;
use std::sync::RwLock;

use super::record::{Deduction, LeaveRecord};
use super::seed::SeedData;
use crate::error::{LedgerError, Result};

/// Ledger backend trait
///
/// `try_deduct` is the only mutation. Balance and history always change
/// together inside it; there is no way to append history on its own.
pub trait LedgerBackend: Send + Sync {
    /// Snapshot of one employee's record
    fn get_record(&self, employee_id: &str) -> Result<LeaveRecord>;

    /// Deduct one day per entry in `dates` and append them to the history.
    ///
    /// Fails with `InsufficientBalance` and leaves the record untouched when
    /// the balance is smaller than `dates.len()`.
    fn try_deduct(&self, employee_id: &str, dates: &[String]) -> Result<Deduction>;

    /// All employee ids, sorted
    fn employee_ids(&self) -> Result<Vec<String>>;

    /// Check if backend is healthy
    fn health_check(&self) -> Result<()>;

    /// Get backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// In-memory ledger (default)
///
/// Records are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    records: RwLock<HashMap<String, LeaveRecord>>,
}

impl InMemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Create a ledger holding the given seed records
    pub fn from_seed(seed: SeedData) -> Self {
        let records = seed
            .into_records()
            .into_iter()
            .map(|record| (record.employee_id.clone(), record))
            .collect();

        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of employees in the ledger
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerBackend for InMemoryLedger {
    fn get_record(&self, employee_id: &str) -> Result<LeaveRecord> {
        let records = self.records.read().map_err(|_| LedgerError::StorageLocked)?;
        records
            .get(employee_id)
            .cloned()
            .ok_or_else(|| LedgerError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn try_deduct(&self, employee_id: &str, dates: &[String]) -> Result<Deduction> {
        let mut records = self.records.write().map_err(|_| LedgerError::StorageLocked)?;
        let record = records
            .get_mut(employee_id)
            .ok_or_else(|| LedgerError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;

        let requested = dates.len();
        if !record.can_deduct(requested) {
            return Err(LedgerError::InsufficientBalance {
                requested,
                available: record.balance,
            });
        }

        // can_deduct bounds requested by the u32 balance
        record.balance -= requested as u32;
        record.history.extend(dates.iter().cloned());

        Ok(Deduction {
            requested,
            remaining: record.balance,
        })
    }

    fn employee_ids(&self) -> Result<Vec<String>> {
        let records = self.records.read().map_err(|_| LedgerError::StorageLocked)?;
        let mut ids: Vec<String> = records.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn health_check(&self) -> Result<()> {
        let _records = self.records.read().map_err(|_| LedgerError::StorageLocked)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(items: &[&str]) -> Vec<String> {
        items.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_get_record() {
        let ledger = InMemoryLedger::from_seed(SeedData::reference());

        let record = ledger.get_record("E001").unwrap();
        assert_eq!(record.balance, 18);
        assert_eq!(record.history.len(), 2);

        let missing = ledger.get_record("E999");
        assert!(matches!(missing, Err(LedgerError::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_try_deduct_appends_in_order() {
        let ledger = InMemoryLedger::from_seed(SeedData::reference());

        let deduction = ledger
            .try_deduct("E001", &dates(&["2025-04-17", "2025-05-01"]))
            .unwrap();
        assert_eq!(deduction.requested, 2);
        assert_eq!(deduction.remaining, 16);

        let record = ledger.get_record("E001").unwrap();
        assert_eq!(
            record.history,
            dates(&["2024-12-25", "2025-01-01", "2025-04-17", "2025-05-01"])
        );
    }

    #[test]
    fn test_try_deduct_insufficient_leaves_record_untouched() {
        let ledger = InMemoryLedger::from_seed(SeedData::new().with_record("E100", 1, vec![]));

        let result = ledger.try_deduct("E100", &dates(&["2025-01-02", "2025-01-03"]));
        match result {
            Err(LedgerError::InsufficientBalance {
                requested,
                available,
            }) => {
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientBalance, got {:?}", other),
        }

        let record = ledger.get_record("E100").unwrap();
        assert_eq!(record.balance, 1);
        assert!(record.history.is_empty());
    }

    #[test]
    fn test_try_deduct_exact_balance() {
        let ledger = InMemoryLedger::from_seed(SeedData::new().with_record("E100", 2, vec![]));

        let deduction = ledger
            .try_deduct("E100", &dates(&["2025-01-02", "2025-01-03"]))
            .unwrap();
        assert_eq!(deduction.remaining, 0);
    }

    #[test]
    fn test_try_deduct_unknown_employee() {
        let ledger = InMemoryLedger::from_seed(SeedData::reference());
        let result = ledger.try_deduct("E999", &dates(&["2025-01-02"]));
        assert!(matches!(result, Err(LedgerError::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_employee_ids_sorted() {
        let ledger = InMemoryLedger::from_seed(
            SeedData::new()
                .with_record("E003", 1, vec![])
                .with_record("E001", 1, vec![]),
        );
        assert_eq!(ledger.employee_ids().unwrap(), vec!["E001", "E003"]);
        assert_eq!(ledger.len(), 2);
        assert!(ledger.health_check().is_ok());
        assert_eq!(ledger.name(), "in-memory");
    }
}
