use models::catalog::OPTION_KINDS;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn index_name(table: &str) -> String { format!("idx_{table}_name") }

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Non-unique: uniqueness among active rows is a service rule
        for kind in OPTION_KINDS {
            manager
                .create_index(
                    Index::create()
                        .name(index_name(kind.table()))
                        .table(Alias::new(kind.table()))
                        .col(OptionTable::Name)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for kind in OPTION_KINDS {
            manager
                .drop_index(Index::drop().name(index_name(kind.table())).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum OptionTable { Name }
