//! Leave record type

use serde::{Deserialize, Serialize};

/// Balance and leave history of a single employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Employee identifier (the ledger key)
    pub employee_id: String,

    /// Remaining leave days
    pub balance: u32,

    /// Dates already taken, in the order they were applied
    pub history: Vec<String>,
}

impl LeaveRecord {
    /// Create a record with an initial balance and history
    pub fn new(employee_id: impl Into<String>, balance: u32, history: Vec<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            balance,
            history,
        }
    }

    /// Whether `days` can be deducted without going below zero
    pub fn can_deduct(&self, days: usize) -> bool {
        days <= self.balance as usize
    }
}

/// Outcome of a successful deduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Number of days deducted
    pub requested: usize,

    /// Balance left after the deduction
    pub remaining: u32,
}
