use tracing::{info, warn};

use signage_auth_types::token::SessionInfo;

use crate::domain::repository::{CredentialRepository, PasswordHasher};
use crate::error::AuthServiceError;

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Change the signed-in admin's password. The session must already have passed the gate.
///
/// Unlike the reset flow there is no minimum length here, only a non-empty check.
pub struct ChangePasswordUseCase<C: CredentialRepository, H: PasswordHasher> {
    pub credentials: C,
    pub hasher: H,
}

impl<C: CredentialRepository, H: PasswordHasher> ChangePasswordUseCase<C, H> {
    pub async fn execute(
        &self,
        session: &SessionInfo,
        input: ChangePasswordInput,
    ) -> Result<(), AuthServiceError> {
        if input.current_password.is_empty() || input.new_password.is_empty() {
            return Err(AuthServiceError::invalid_input(
                "Current and new password are required",
            ));
        }

        let admin = self
            .credentials
            .find_by_id(session.admin_id)
            .await?
            .ok_or(AuthServiceError::AdminNotFound)?;

        if !self
            .hasher
            .verify(&input.current_password, &admin.password_hash)
            .await?
        {
            warn!(admin_id = %admin.id, "change password with wrong current password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        let hash = self.hasher.hash(&input.new_password).await?;
        self.credentials.update_password(admin.id, &hash).await?;
        info!(admin_id = %admin.id, "admin password changed");
        Ok(())
    }
}
