use chrono::Duration;
use rand::RngExt;
use tracing::{info, warn};
use uuid::Uuid;

use signage_domain::email::Email;
use signage_domain::password::check_password_policy;

use crate::domain::clock::SharedClock;
use crate::domain::repository::{CredentialRepository, MailSender, OtpRepository, PasswordHasher};
use crate::domain::types::{OTP_RANGE, OTP_TTL_SECS, OneTimeCode};
use crate::error::AuthServiceError;

/// Uniform draw over `OTP_RANGE`, so always exactly six digits.
pub fn generate_code() -> String {
    rand::rng().random_range(OTP_RANGE).to_string()
}

// ── RequestReset ──────────────────────────────────────────────────────────────

pub struct RequestResetInput {
    pub email: String,
}

#[derive(Debug)]
pub struct RequestResetOutput {
    pub email: String,
}

pub struct RequestResetUseCase<C, O, M>
where
    C: CredentialRepository,
    O: OtpRepository,
    M: MailSender,
{
    pub credentials: C,
    pub otps: O,
    pub mailer: M,
    pub clock: SharedClock,
}

impl<C, O, M> RequestResetUseCase<C, O, M>
where
    C: CredentialRepository,
    O: OtpRepository,
    M: MailSender,
{
    pub async fn execute(
        &self,
        input: RequestResetInput,
    ) -> Result<RequestResetOutput, AuthServiceError> {
        // 1. Shape check → 400
        let email = Email::parse(input.email.trim())
            .map_err(|_| AuthServiceError::invalid_input("Please enter a valid email address"))?;

        // 2. Unknown account → 404
        if self
            .credentials
            .find_by_email(email.as_str())
            .await?
            .is_none()
        {
            warn!(email = %email.as_str(), "reset requested for unknown email");
            return Err(AuthServiceError::AdminNotFound);
        }

        // 3. Persist a fresh code; earlier outstanding codes stay valid.
        let now = self.clock.now();
        let code = OneTimeCode {
            id: Uuid::new_v4(),
            email: email.as_str().to_owned(),
            code: generate_code(),
            created_at: now,
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            used_at: None,
        };
        self.otps.insert(&code).await?;

        // 4. Deliver. A failure here leaves the persisted code redeemable until it expires.
        self.mailer.send_otp(&code.email, &code.code).await?;
        info!(email = %code.email, "reset code issued");

        Ok(RequestResetOutput {
            email: email.into_inner(),
        })
    }
}

// ── RedeemReset ───────────────────────────────────────────────────────────────

pub struct RedeemResetInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct RedeemResetUseCase<O: OtpRepository, H: PasswordHasher> {
    pub otps: O,
    pub hasher: H,
    pub clock: SharedClock,
}

impl<O: OtpRepository, H: PasswordHasher> RedeemResetUseCase<O, H> {
    pub async fn execute(&self, input: RedeemResetInput) -> Result<(), AuthServiceError> {
        let email = input.email.trim();
        let code = input.code.trim();
        if email.is_empty() || code.is_empty() || input.new_password.is_empty() {
            return Err(AuthServiceError::invalid_input(
                "Email, OTP, and new password are required",
            ));
        }
        check_password_policy(&input.new_password)
            .map_err(|e| AuthServiceError::invalid_input(e.to_string()))?;

        let otp = self
            .otps
            .find_valid(email, code, self.clock.now())
            .await?
            .ok_or(AuthServiceError::InvalidOrExpiredCode)?;

        let hash = self.hasher.hash(&input.new_password).await?;

        // Hashing takes long enough for the code to expire; re-read the clock for the claim.
        // Lost race or expired since the lookup: treated like any other stale code.
        if !self
            .otps
            .consume_and_rotate(&otp, &hash, self.clock.now())
            .await?
        {
            warn!(email, "reset code consumed concurrently or expired during redemption");
            return Err(AuthServiceError::InvalidOrExpiredCode);
        }

        info!(email, "password reset via code");
        Ok(())
    }
}
