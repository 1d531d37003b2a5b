//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// The signing secret, issuer, and audience are loaded once at startup and
/// injected into the token codec; they are never read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Expected `iss` claim on every issued and verified token.
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Expected `aud` claim on every issued and verified token.
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,
    /// Session token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Consecutive failed login attempts before lockout.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: i32,
    /// Interval between revocation ledger sweeps, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub revocation_sweep_interval_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_jwt_issuer(),
            jwt_audience: default_jwt_audience(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            max_failed_attempts: default_max_failed(),
            revocation_sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_jwt_issuer() -> String {
    "notehub".to_string()
}

fn default_jwt_audience() -> String {
    "notehub-clients".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    6
}

fn default_max_failed() -> i32 {
    5
}

fn default_sweep_interval() -> u64 {
    300
}
