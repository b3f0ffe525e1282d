use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::domain::clock::SharedClock;
use crate::infra::db::{DbCredentialRepository, DbOtpRepository};
use crate::infra::mail::SmtpMailSender;
use crate::infra::password::BcryptHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    /// Set the `Secure` attribute on the session cookie (production only).
    pub secure_cookies: bool,
    pub mailer: SmtpMailSender,
    pub hasher: BcryptHasher,
    pub clock: SharedClock,
    /// Requests still running after this answer `TIMEOUT` instead of hanging.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn credential_repo(&self) -> DbCredentialRepository {
        DbCredentialRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }
}
