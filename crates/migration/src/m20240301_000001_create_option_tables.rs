//! Create one table per option kind.
//!
//! Every table has the same shape; `deleted_at` is the soft-delete marker.
//! `name` is deliberately not unique: a soft-deleted name may be reused.
use models::catalog::OPTION_KINDS;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for kind in OPTION_KINDS {
            manager
                .create_table(
                    Table::create()
                        .table(Alias::new(kind.table()))
                        .if_not_exists()
                        .col(string_len(OptionTable::Id, 64).primary_key())
                        .col(string_len(OptionTable::Name, 255).not_null())
                        .col(ColumnDef::new(OptionTable::Description).text().null())
                        .col(timestamp_with_time_zone(OptionTable::CreatedAt).not_null())
                        .col(timestamp_with_time_zone(OptionTable::UpdatedAt).not_null())
                        // Explicitly define nullable deleted_at to avoid conflicting NULL/NOT NULL
                        .col(
                            ColumnDef::new(OptionTable::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for kind in OPTION_KINDS.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(kind.table())).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum OptionTable { Id, Name, Description, CreatedAt, UpdatedAt, DeletedAt }
