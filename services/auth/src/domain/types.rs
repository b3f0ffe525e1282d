use chrono::{DateTime, Utc};
use uuid::Uuid;

use signage_domain::role::Role;

/// Stored admin login.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Emailed password-reset code.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl OneTimeCode {
    /// Unused and `now < expires_at`. Expiry is computed, never stored as a state.
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && now < self.expires_at
    }
}

/// Reset code time-to-live in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

/// Inclusive range the 6-digit reset code is drawn from.
pub const OTP_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// How long used or expired reset codes are kept before the sweep deletes them.
pub const OTP_RETENTION_HOURS: i64 = 24;
