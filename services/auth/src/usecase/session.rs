use tracing::{info, warn};

use signage_auth_types::cookie::SESSION_TOKEN_EXP;
use signage_auth_types::token::{SessionClaims, SessionInfo, sign_session_token, verify_session_token};

use crate::domain::clock::SharedClock;
use crate::domain::repository::{CredentialRepository, PasswordHasher};
use crate::domain::types::AdminCredential;
use crate::error::AuthServiceError;

/// Mint a session token for `admin` issued at `now` (seconds since epoch).
/// Returns the token and its expiry.
pub fn issue_session_token(
    admin: &AdminCredential,
    secret: &str,
    now: u64,
) -> Result<(String, u64), AuthServiceError> {
    let exp = now + SESSION_TOKEN_EXP;
    let claims = SessionClaims {
        id: admin.id.to_string(),
        email: admin.email.clone(),
        role: admin.role.as_str().to_owned(),
        iat: now,
        exp,
    };
    let token =
        sign_session_token(&claims, secret).map_err(|e| AuthServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// The session gate check.
///
/// Absent, tampered, or expired tokens are `Unauthenticated`; a valid token whose
/// role is not admin is `Forbidden`.
pub fn verify_session(
    token: Option<&str>,
    secret: &str,
    now: u64,
) -> Result<SessionInfo, AuthServiceError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(AuthServiceError::Unauthenticated)?;
    let session =
        verify_session_token(token, secret, now).map_err(|_| AuthServiceError::Unauthenticated)?;
    if !session.role.is_admin() {
        return Err(AuthServiceError::Forbidden);
    }
    Ok(session)
}

// ── Login ─────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub admin: AdminCredential,
    pub token: String,
    pub expires_at: u64,
}

pub struct LoginUseCase<C: CredentialRepository, H: PasswordHasher> {
    pub credentials: C,
    pub hasher: H,
    pub clock: SharedClock,
    pub jwt_secret: String,
}

impl<C: CredentialRepository, H: PasswordHasher> LoginUseCase<C, H> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AuthServiceError> {
        let email = input.email.trim();
        if email.is_empty() {
            return Err(AuthServiceError::invalid_input("Email and password are required"));
        }

        // 1. Authenticate: unknown email and wrong password are indistinguishable.
        let Some(admin) = self.credentials.find_by_email(email).await? else {
            warn!(email, "login with unknown email");
            return Err(AuthServiceError::InvalidCredentials);
        };
        if !self
            .hasher
            .verify(&input.password, &admin.password_hash)
            .await?
        {
            warn!(email, "login with wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        // 2. Authorize: only the admin role may hold a session.
        if !admin.role.is_admin() {
            warn!(email, role = %admin.role, "login by non-admin role");
            return Err(AuthServiceError::Forbidden);
        }

        let (token, expires_at) =
            issue_session_token(&admin, &self.jwt_secret, self.clock.now_secs())?;
        info!(admin_id = %admin.id, "admin logged in");

        Ok(LoginOutput {
            admin,
            token,
            expires_at,
        })
    }
}
