//! Credential service — the state machine over account status.
//!
//! Orchestrates the password hasher, token issuer, revocation ledger, and
//! account guard. Every login outcome that is not a success maps to the
//! same generic invalid-credentials error: unknown email, wrong password,
//! and blocked or inactive accounts are indistinguishable to the client.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use notehub_core::config::auth::AuthConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::store::UserStore;
use notehub_entity::user::{CreateUser, User, UserRole};

use crate::guard::AccountGuard;
use crate::jwt::{Claims, TokenIssuer};
use crate::password::{PasswordHasher, PasswordValidator};
use crate::revocation::RevocationLedger;

/// Result of a successful login, registration, or refresh.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Signed session token.
    pub token: String,
    /// Claims embedded in the session token.
    pub claims: Claims,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Session token expiry.
    pub expires_at: DateTime<Utc>,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
    /// The authenticated account.
    pub user: User,
}

/// Orchestrates all credential operations.
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    issuer: Arc<TokenIssuer>,
    ledger: Arc<RevocationLedger>,
    guard: AccountGuard,
    password_policy: PasswordValidator,
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialService")
            .field("issuer", &self.issuer)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl CredentialService {
    /// Creates a new credential service with all required dependencies.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        issuer: Arc<TokenIssuer>,
        ledger: Arc<RevocationLedger>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            guard: AccountGuard::new(users.clone(), config),
            password_policy: PasswordValidator::new(config),
            users,
            hasher,
            issuer,
            ledger,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Look up the account by email
    /// 2. Reject non-active accounts (same error as bad credentials)
    /// 3. Verify the password; on mismatch record the failure (which may
    ///    block the account) and reject
    /// 4. On match reset the failure counter and issue a fresh token pair
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!(email, "Login rejected: unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !user.can_login() {
            warn!(
                user_id = %user.id,
                status = %user.status,
                "Login rejected: account is not active"
            );
            return Err(AppError::invalid_credentials());
        }

        if !self.hasher.verify_password(password, &user.password_hash) {
            self.guard.record_failure(&user).await?;
            return Err(AppError::invalid_credentials());
        }

        self.guard.record_success(&user).await?;

        let session = self.open_session(&user).await?;
        info!(user_id = %user.id, "Login successful");
        Ok(session)
    }

    /// Registers a new account and logs it straight in.
    ///
    /// New accounts get the Editor role so they can manage their own notes.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<AuthSession> {
        self.password_policy.validate(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            warn!(email, "Registration rejected: email already in use");
            return Err(AppError::duplicate_email(email));
        }

        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                name: name.to_string(),
                password_hash: self.hasher.hash_password(password)?,
                role: UserRole::Editor,
            })
            .await?;

        let session = self.open_session(&user).await?;
        info!(user_id = %user.id, email, "Account registered");
        Ok(session)
    }

    /// Exchanges a refresh token for a fresh token pair.
    ///
    /// The refresh token is opaque: the owning account is resolved by
    /// matching the presented value against the stored one, never by
    /// decoding it. Rotation is a compare-and-swap on the previous value,
    /// so presenting a stale token after rotation fails.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthSession> {
        let Some(user) = self.users.find_by_refresh_token(refresh_token).await? else {
            debug!("Refresh rejected: unknown refresh token");
            return Err(AppError::invalid_refresh_token());
        };

        if !user.has_valid_refresh_token(Utc::now()) {
            debug!(user_id = %user.id, "Refresh rejected: stored refresh token expired");
            return Err(AppError::invalid_refresh_token());
        }

        if !user.can_login() {
            warn!(user_id = %user.id, status = %user.status, "Refresh rejected: account not active");
            return Err(AppError::invalid_refresh_token());
        }

        let issued = self.issuer.issue(&user)?;
        let next_refresh = generate_refresh_token();
        let refresh_expires_at = Utc::now() + chrono::Duration::days(self.refresh_ttl_days);

        let rotated = self
            .users
            .rotate_refresh_token(user.id, refresh_token, &next_refresh, refresh_expires_at)
            .await?;

        if !rotated {
            // Lost a race with a concurrent rotation or logout.
            debug!(user_id = %user.id, "Refresh rejected: token rotated concurrently");
            return Err(AppError::invalid_refresh_token());
        }

        info!(user_id = %user.id, "Session token refreshed");
        Ok(AuthSession {
            expires_at: issued.claims.expires_at(),
            token: issued.token,
            claims: issued.claims,
            refresh_token: next_refresh,
            refresh_expires_at,
            user,
        })
    }

    /// Logs out the session behind the presented claims.
    ///
    /// Both effects are required for true invalidation: clearing the
    /// stored refresh token prevents renewal, and revoking the jti kills
    /// the still-unexpired session token. Idempotent.
    pub async fn logout(&self, claims: &Claims) -> AppResult<()> {
        if claims.jti.is_nil() {
            return Err(AppError::validation("Token carries no jti claim"));
        }

        self.users.clear_refresh_token(claims.sub).await?;
        self.ledger.revoke(claims.jti, claims.expires_at());

        info!(user_id = %claims.sub, jti = %claims.jti, "Logout completed");
        Ok(())
    }

    /// Administrative unblock: restores Active status and resets the
    /// failure counter.
    pub async fn unblock(&self, user_id: Uuid) -> AppResult<User> {
        let user = self
            .users
            .unblock(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        info!(user_id = %user.id, "Account unblocked");
        Ok(user)
    }

    /// Issues a session token plus a fresh refresh token, overwriting any
    /// previously stored refresh token for the account.
    async fn open_session(&self, user: &User) -> AppResult<AuthSession> {
        let issued = self.issuer.issue(user)?;
        let refresh_token = generate_refresh_token();
        let refresh_expires_at = Utc::now() + chrono::Duration::days(self.refresh_ttl_days);

        self.users
            .store_refresh_token(user.id, &refresh_token, refresh_expires_at)
            .await?;

        Ok(AuthSession {
            expires_at: issued.claims.expires_at(),
            token: issued.token,
            claims: issued.claims,
            refresh_token,
            refresh_expires_at,
            user: user.clone(),
        })
    }
}

/// Generates an opaque 256-bit refresh token, base64-encoded.
fn generate_refresh_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
