//! Error types for ledger operations
//!
//! Every variant carries a stable error code (e.g. `EMPLOYEE_NOT_FOUND`) and
//! belongs to an [`ErrorCategory`]. Tool handlers turn the two domain errors
//! (`EmployeeNotFound`, `InsufficientBalance`) into plain text answers; the
//! remaining variants are infrastructure failures.
//!
//! # Example
//!
//! ```rust
//! use leave_core::error::{ErrorCategory, LedgerError};
//!
//! let err = LedgerError::InsufficientBalance { requested: 25, available: 20 };
//! assert_eq!(err.category(), ErrorCategory::Conflict);
//! assert_eq!(err.error_code(), "INSUFFICIENT_BALANCE");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Record not found
    NotFound,
    /// Input or seed data rejected
    Validation,
    /// Request conflicts with the current record state
    Conflict,
    /// Internal failure
    Internal,
    /// File system or other external failure
    External,
}

/// Errors that can occur in ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    // ═══════════════════════════════════════════════════════════════════════
    // Record errors
    // ═══════════════════════════════════════════════════════════════════════
    /// No record exists for the employee
    #[error("Employee not found: '{employee_id}'")]
    EmployeeNotFound { employee_id: String },

    /// Requested more days than the record holds; nothing was changed
    #[error("Insufficient balance: requested {requested} day(s), available {available}")]
    InsufficientBalance { requested: usize, available: u32 },

    // ═══════════════════════════════════════════════════════════════════════
    // Seed errors
    // ═══════════════════════════════════════════════════════════════════════
    /// Seed document is malformed
    #[error("Invalid seed data: {reason}")]
    InvalidSeed { reason: String },

    /// Seed file could not be read
    #[error("Failed to load seed data from '{path}': {reason}")]
    SeedLoadError { path: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Infrastructure errors
    // ═══════════════════════════════════════════════════════════════════════
    /// Ledger lock is poisoned (panic occurred while holding lock)
    #[error("Ledger lock poisoned. This is a bug; please report it.")]
    StorageLocked,
}

impl LedgerError {
    /// Returns true if this error might succeed on retry
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LedgerError::StorageLocked)
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            LedgerError::EmployeeNotFound { .. } => ErrorCategory::NotFound,
            LedgerError::InsufficientBalance { .. } => ErrorCategory::Conflict,
            LedgerError::InvalidSeed { .. } => ErrorCategory::Validation,
            LedgerError::SeedLoadError { .. } => ErrorCategory::External,
            LedgerError::StorageLocked => ErrorCategory::Internal,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LedgerError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
            LedgerError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            LedgerError::InvalidSeed { .. } => "INVALID_SEED",
            LedgerError::SeedLoadError { .. } => "SEED_LOAD_ERROR",
            LedgerError::StorageLocked => "STORAGE_LOCKED",
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::InvalidSeed {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = LedgerError::EmployeeNotFound {
            employee_id: "E999".to_string(),
        };
        assert_eq!(err.error_code(), "EMPLOYEE_NOT_FOUND");
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.is_recoverable());

        assert_eq!(LedgerError::StorageLocked.error_code(), "STORAGE_LOCKED");
        assert!(LedgerError::StorageLocked.is_recoverable());
    }

    #[test]
    fn test_insufficient_balance_message() {
        let err = LedgerError::InsufficientBalance {
            requested: 25,
            available: 20,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested 25 day(s), available 20"
        );
    }

    #[test]
    fn test_json_error_becomes_invalid_seed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: LedgerError = json_err.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
