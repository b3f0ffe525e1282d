use anyhow::Context as _;

use crate::domain::repository::PasswordHasher;
use crate::error::AuthServiceError;

/// bcrypt on the blocking pool; a cost-10 hash takes tens of milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    pub cost: u32,
}

impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, AuthServiceError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("join bcrypt hash task")?
            .context("bcrypt hash")?;
        Ok(hashed)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthServiceError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("join bcrypt verify task")?
            .context("bcrypt verify")?;
        Ok(matches)
    }
}
