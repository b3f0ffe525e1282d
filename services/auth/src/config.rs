use std::time::Duration;

use serde::Deserialize;

use signage_core::config::Config;

/// Auth service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// TCP port to listen on. Env var: `AUTH_PORT`.
    #[serde(default = "default_auth_port")]
    pub auth_port: u16,
    /// `production` turns on the `Secure` cookie attribute.
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// `true`: implicit TLS (usually port 465). `false`: STARTTLS.
    #[serde(default)]
    pub smtp_secure: bool,
    pub smtp_user: String,
    pub smtp_pass: String,
    /// From mailbox, e.g. `Signage <noreply@example.com>`.
    pub smtp_from: String,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Connect/acquire timeout for the database pool.
    #[serde(default = "default_timeout_secs")]
    pub store_timeout_secs: u64,
    /// Upper bound on a single SMTP send.
    #[serde(default = "default_timeout_secs")]
    pub mail_timeout_secs: u64,
    /// Upper bound on one HTTP request, store and mail calls included.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Interval of the stale reset-code sweep. 0 disables it.
    #[serde(default = "default_sweep_interval_secs")]
    pub otp_sweep_interval_secs: u64,
}

impl Config for AuthConfig {}

impl AuthConfig {
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mail_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn otp_sweep_interval(&self) -> Option<Duration> {
        (self.otp_sweep_interval_secs > 0).then(|| Duration::from_secs(self.otp_sweep_interval_secs))
    }
}

fn default_auth_port() -> u16 {
    3000
}

fn default_app_env() -> String {
    "development".to_owned()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_sweep_interval_secs() -> u64 {
    3600
}
