use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PasswordResetOtps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PasswordResetOtps::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PasswordResetOtps::Email).string().not_null())
                    .col(
                        ColumnDef::new(PasswordResetOtps::Code)
                            .string_len(6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PasswordResetOtps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PasswordResetOtps::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PasswordResetOtps::UsedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PasswordResetOtps::Table)
                    .col(PasswordResetOtps::Email)
                    .col(PasswordResetOtps::Code)
                    .name("idx_password_reset_otps_email_code")
                    .to_owned(),
            )
            .await?;

        // Sweep scans by expiry.
        manager
            .create_index(
                Index::create()
                    .table(PasswordResetOtps::Table)
                    .col(PasswordResetOtps::ExpiresAt)
                    .name("idx_password_reset_otps_expires_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PasswordResetOtps::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PasswordResetOtps {
    Table,
    Id,
    Email,
    Code,
    CreatedAt,
    ExpiresAt,
    UsedAt,
}
