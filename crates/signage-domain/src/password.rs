//! Password policy.

/// Minimum accepted length for a new password set through the reset flow.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password must be at least {MIN_PASSWORD_LEN} characters")]
pub struct PasswordTooShort;

/// Length is counted in characters, not bytes.
pub fn check_password_policy(password: &str) -> Result<(), PasswordTooShort> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordTooShort);
    }
    Ok(())
}
