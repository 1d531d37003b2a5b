//! In-process revocation ledger for session token jtis.
//!
//! A revoked jti stays invalid until its token's natural expiry, after
//! which the entry is garbage. [`RevocationLedger::sweep_expired`] purges
//! those entries; expired tokens are already rejected by the verifier, so
//! the sweep is a memory-hygiene obligation, not a correctness one.
//!
//! The process-local map is a deliberate single-process simplification; a
//! multi-instance deployment would put the same interface over a shared
//! store.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

/// Registry of jti values invalidated before natural expiry.
///
/// All operations are synchronous and take the internal lock only for the
/// duration of a map access; the lock is never held across an await point.
#[derive(Debug, Default)]
pub struct RevocationLedger {
    /// jti → the revoked token's natural expiry.
    entries: Mutex<HashMap<Uuid, DateTime<Utc>>>,
}

impl RevocationLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a jti as revoked until the given expiry.
    ///
    /// Revoking the nil jti is a no-op: there is nothing meaningful to
    /// revoke, and treating it as an error would break logout idempotency.
    pub fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) {
        if jti.is_nil() {
            warn!("Attempted to revoke a nil jti; ignoring");
            return;
        }

        self.lock().insert(jti, expires_at);
        info!(%jti, %expires_at, "Token jti revoked");
    }

    /// Checks whether the given jti has been revoked.
    pub fn is_revoked(&self, jti: &Uuid) -> bool {
        if jti.is_nil() {
            return false;
        }
        self.lock().contains_key(jti)
    }

    /// Removes entries whose token has passed its natural expiry.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            info!(removed, remaining = entries.len(), "Swept expired revocation entries");
        }
        removed
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A poisoned lock only means another thread panicked mid-access; the
    /// map itself is still a valid set of revocations, so keep serving it.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, DateTime<Utc>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
