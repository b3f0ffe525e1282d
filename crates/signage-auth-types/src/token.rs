//! Session-token signing and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
use serde::Serialize;
use uuid::Uuid;

use signage_domain::role::Role;

/// Admin identity extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub admin_id: Uuid,
    pub email: String,
    pub role: Role,
    pub issued_at: u64,
    pub expires_at: u64,
}

/// Errors returned by [`verify_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `id` | custom | credential ID (UUID string) |
/// | `email` | custom | credential email at login time |
/// | `role` | custom | role tag, `"admin"` to pass the gate |
/// | `iat` | `iat` | issuance, seconds since epoch |
/// | `exp` | `exp` | expiration, seconds since epoch |
///
/// [`Serialize`] requires the **`USE_ONLY_IN_AUTH_SERVICE`** feature; only the auth
/// service mints tokens.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test), derive(Serialize))]
pub struct SessionClaims {
    pub id: String,
    pub email: String,
    pub role: String,
    pub iat: u64,
    pub exp: u64,
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Decode a JWT and check expiry against the caller-supplied `now`.
///
/// Signature is HS256. Expiry is checked here rather than by `jsonwebtoken` so that
/// the caller's clock is authoritative and there is no leeway: a token is valid
/// while `now < exp`.
fn decode_jwt(token: &str, secret: &str, now: u64) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    if now >= data.claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(data.claims)
}

// ── Public: all consumers ────────────────────────────────────────────────

/// Validate a session-cookie value at time `now` (seconds since epoch).
///
/// Role is returned as-is; deciding whether the role may pass is the gate's job.
pub fn verify_session_token(
    cookie_value: &str,
    secret: &str,
    now: u64,
) -> Result<SessionInfo, TokenError> {
    let claims = decode_jwt(cookie_value, secret, now)?;
    let admin_id = claims
        .id
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(SessionInfo {
        admin_id,
        email: claims.email,
        role: Role::parse(&claims.role),
        issued_at: claims.iat,
        expires_at: claims.exp,
    })
}

// ── Feature-gated: auth service only ─────────────────────────────────────

/// Sign session claims with HS256.
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
pub fn sign_session_token(
    claims: &SessionClaims,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
