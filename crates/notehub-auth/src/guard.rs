//! Failed-login tracking and account lockout.

use std::sync::Arc;

use tracing::{debug, warn};

use notehub_core::config::auth::AuthConfig;
use notehub_core::result::AppResult;
use notehub_database::store::{LoginFailure, UserStore};
use notehub_entity::user::{User, UserStatus};

/// Tracks consecutive failed login attempts per account and enforces
/// lockout once the configured threshold is reached.
///
/// The guard itself holds no counters: the increment-and-maybe-block is a
/// single atomic store operation, so two concurrent failed logins against
/// the same account can never under-count.
#[derive(Clone)]
pub struct AccountGuard {
    store: Arc<dyn UserStore>,
    max_failed_attempts: i32,
}

impl std::fmt::Debug for AccountGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountGuard")
            .field("max_failed_attempts", &self.max_failed_attempts)
            .finish()
    }
}

impl AccountGuard {
    /// Creates a new guard over the given store.
    pub fn new(store: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            max_failed_attempts: config.max_failed_attempts,
        }
    }

    /// Records a failed login attempt, blocking the account when the
    /// post-increment counter reaches the threshold.
    pub async fn record_failure(&self, user: &User) -> AppResult<LoginFailure> {
        let outcome = self
            .store
            .record_login_failure(user.id, self.max_failed_attempts)
            .await?;

        if outcome.status == UserStatus::Blocked && user.status != UserStatus::Blocked {
            warn!(
                user_id = %user.id,
                email = %user.email,
                attempts = outcome.attempts,
                "Account blocked after repeated failed login attempts"
            );
        } else {
            debug!(
                user_id = %user.id,
                attempts = outcome.attempts,
                "Failed login attempt recorded"
            );
        }

        Ok(outcome)
    }

    /// Records a successful login, resetting the failure counter and
    /// stamping the last-login time.
    pub async fn record_success(&self, user: &User) -> AppResult<()> {
        self.store.record_login_success(user.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use notehub_database::memory::MemoryUserStore;
    use notehub_entity::user::{CreateUser, UserRole};

    async fn setup() -> (AccountGuard, Arc<MemoryUserStore>, User) {
        let store = Arc::new(MemoryUserStore::new());
        let user = store
            .create(&CreateUser {
                email: "ana@x.com".to_string(),
                name: "Ana".to_string(),
                password_hash: "digest".to_string(),
                role: UserRole::Editor,
            })
            .await
            .unwrap();
        let guard = AccountGuard::new(store.clone(), &AuthConfig::default());
        (guard, store, user)
    }

    #[tokio::test]
    async fn fifth_failure_blocks_the_account() {
        let (guard, store, user) = setup().await;

        for expected in 1..=4 {
            let outcome = guard.record_failure(&user).await.unwrap();
            assert_eq!(outcome.attempts, expected);
            assert_eq!(outcome.status, UserStatus::Active);
        }

        let outcome = guard.record_failure(&user).await.unwrap();
        assert_eq!(outcome.attempts, 5);
        assert_eq!(outcome.status, UserStatus::Blocked);

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.status, UserStatus::Blocked);
        assert!(stored.blocked_at.is_some());
    }

    #[tokio::test]
    async fn success_resets_the_counter() {
        let (guard, store, user) = setup().await;

        guard.record_failure(&user).await.unwrap();
        guard.record_failure(&user).await.unwrap();
        guard.record_success(&user).await.unwrap();

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.failed_login_attempts, 0);
        assert!(stored.last_login_at.is_some());
        assert!(stored.last_login_at.unwrap() <= Utc::now());
    }
}
