//! Leave ledger
//!
//! The ledger is the single store of employee leave records. It is shared by
//! every session; all access goes through the [`LedgerBackend`] trait.

mod record;
mod seed;
mod store;

pub use record::{Deduction, LeaveRecord};
pub use seed::{SeedData, SeedRecord};
pub use store::{InMemoryLedger, LedgerBackend};
