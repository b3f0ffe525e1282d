#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{AdminCredential, OneTimeCode};
use crate::error::AuthServiceError;

/// Store of admin logins.
pub trait CredentialRepository: Send + Sync {
    async fn find_by_email(&self, email: &str)
    -> Result<Option<AdminCredential>, AuthServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminCredential>, AuthServiceError>;

    async fn update_password(&self, id: Uuid, password_hash: &str)
    -> Result<(), AuthServiceError>;
}

/// Store of password-reset codes.
pub trait OtpRepository: Send + Sync {
    async fn insert(&self, code: &OneTimeCode) -> Result<(), AuthServiceError>;

    /// Newest code for (email, code) that is unused and unexpired at `now`.
    async fn find_valid(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OneTimeCode>, AuthServiceError>;

    /// Mark `code` used and set the password hash of the credential with the code's
    /// email, in one transaction.
    ///
    /// The mark is a conditional update on `used_at IS NULL AND expires_at > now`.
    /// Returns `false` without rotating anything if another redemption won the row
    /// or the code expired in between.
    async fn consume_and_rotate(
        &self,
        code: &OneTimeCode,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AuthServiceError>;

    /// Delete codes that expired or were used before `before`. Returns rows deleted.
    async fn purge_stale(&self, before: DateTime<Utc>) -> Result<u64, AuthServiceError>;
}

/// Outbound delivery of reset codes.
pub trait MailSender: Send + Sync {
    /// Fails with `DeliveryFailed` when the message could not be handed off.
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), AuthServiceError>;
}

/// One-way password hashing with constant-effort verification.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, AuthServiceError>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthServiceError>;
}
