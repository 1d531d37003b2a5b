//! Pre-expiry token invalidation.

pub mod ledger;

pub use ledger::RevocationLedger;
