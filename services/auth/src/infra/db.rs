use std::time::Duration;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Condition, Database,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use signage_auth_schema::{admin_credentials, password_reset_otps};
use signage_domain::role::Role;

use crate::domain::repository::{CredentialRepository, OtpRepository};
use crate::domain::types::{AdminCredential, OneTimeCode};
use crate::error::AuthServiceError;

/// Open the shared pool. `timeout` bounds both connecting and acquiring a connection
/// so a stalled store surfaces as an error instead of hanging the request.
pub async fn connect(url: &str, timeout: Duration) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);
    Database::connect(options)
        .await
        .context("connect to database")
}

// ── Credential repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCredentialRepository {
    pub db: DatabaseConnection,
}

impl CredentialRepository for DbCredentialRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminCredential>, AuthServiceError> {
        let model = admin_credentials::Entity::find()
            .filter(admin_credentials::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find credential by email")?;
        Ok(model.map(credential_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminCredential>, AuthServiceError> {
        let model = admin_credentials::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find credential by id")?;
        Ok(model.map(credential_from_model))
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AuthServiceError> {
        admin_credentials::Entity::update_many()
            .col_expr(
                admin_credentials::Column::PasswordHash,
                Expr::value(password_hash.to_owned()),
            )
            .filter(admin_credentials::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update credential password")?;
        Ok(())
    }
}

fn credential_from_model(model: admin_credentials::Model) -> AdminCredential {
    AdminCredential {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role: Role::parse(&model.role),
    }
}

// ── Reset-code repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn insert(&self, code: &OneTimeCode) -> Result<(), AuthServiceError> {
        password_reset_otps::ActiveModel {
            id: Set(code.id),
            email: Set(code.email.clone()),
            code: Set(code.code.clone()),
            created_at: Set(code.created_at),
            expires_at: Set(code.expires_at),
            used_at: Set(None),
        }
        .insert(&self.db)
        .await
        .context("insert reset code")?;
        Ok(())
    }

    async fn find_valid(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OneTimeCode>, AuthServiceError> {
        let model = password_reset_otps::Entity::find()
            .filter(password_reset_otps::Column::Email.eq(email))
            .filter(password_reset_otps::Column::Code.eq(code))
            .filter(password_reset_otps::Column::UsedAt.is_null())
            .filter(password_reset_otps::Column::ExpiresAt.gt(now))
            .order_by_desc(password_reset_otps::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find valid reset code")?;
        Ok(model.map(otp_from_model))
    }

    async fn consume_and_rotate(
        &self,
        code: &OneTimeCode,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AuthServiceError> {
        let code_id = code.id;
        let email = code.email.clone();
        let password_hash = password_hash.to_owned();
        let rotated = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let claimed = password_reset_otps::Entity::update_many()
                        .col_expr(password_reset_otps::Column::UsedAt, Expr::value(now))
                        .filter(password_reset_otps::Column::Id.eq(code_id))
                        .filter(password_reset_otps::Column::UsedAt.is_null())
                        .filter(password_reset_otps::Column::ExpiresAt.gt(now))
                        .exec(txn)
                        .await?;
                    if claimed.rows_affected == 0 {
                        return Ok(false);
                    }

                    admin_credentials::Entity::update_many()
                        .col_expr(
                            admin_credentials::Column::PasswordHash,
                            Expr::value(password_hash),
                        )
                        .filter(admin_credentials::Column::Email.eq(email))
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .context("consume reset code and rotate password")?;
        Ok(rotated)
    }

    async fn purge_stale(&self, before: DateTime<Utc>) -> Result<u64, AuthServiceError> {
        let result = password_reset_otps::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(password_reset_otps::Column::ExpiresAt.lt(before))
                    .add(password_reset_otps::Column::UsedAt.lt(before)),
            )
            .exec(&self.db)
            .await
            .context("purge stale reset codes")?;
        Ok(result.rows_affected)
    }
}

fn otp_from_model(model: password_reset_otps::Model) -> OneTimeCode {
    OneTimeCode {
        id: model.id,
        email: model.email,
        code: model.code,
        created_at: model.created_at,
        expires_at: model.expires_at,
        used_at: model.used_at,
    }
}
