//! Leave Core
//!
//! In-memory leave ledger used by the Leave Manager tools.
//!
//! ## Example
//!
//! ```rust
//! use leave_core::{InMemoryLedger, LedgerBackend, SeedData};
//!
//! let ledger = InMemoryLedger::from_seed(SeedData::reference());
//!
//! let dates = vec!["2025-04-17".to_string(), "2025-05-01".to_string()];
//! let deduction = ledger.try_deduct("E001", &dates).unwrap();
//! assert_eq!(deduction.remaining, 16);
//!
//! let record = ledger.get_record("E001").unwrap();
//! assert_eq!(record.history.len(), 4);
//! ```

pub mod error;
pub mod ledger;

pub use error::{ErrorCategory, LedgerError, Result};
pub use ledger::{Deduction, InMemoryLedger, LeaveRecord, LedgerBackend, SeedData, SeedRecord};
