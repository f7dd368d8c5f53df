use async_trait::async_trait;
use sea_orm::{
    sea_query::{Alias, DeleteStatement, Expr, InsertStatement, OnConflict, Order, Query, SelectStatement},
    ConnectionTrait, DatabaseConnection, FromQueryResult, TransactionTrait,
};

use models::option::{OptionColumn, OptionRecord, OptionRow, RecordId};

use crate::errors::ServiceError;
use crate::option::repository::OptionRepository;

/// SeaORM-backed repository over one option table.
///
/// All option tables share one shape, so statements are built against the
/// table name instead of a per-kind entity.
pub struct SeaOrmOptionRepository {
    pub db: DatabaseConnection,
    pub table: &'static str,
}

impl SeaOrmOptionRepository {
    pub fn new(db: DatabaseConnection, table: &'static str) -> Self { Self { db, table } }

    fn select(&self) -> SelectStatement {
        Query::select()
            .columns(OptionColumn::ALL)
            .from(Alias::new(self.table))
            .order_by(OptionColumn::CreatedAt, Order::Asc)
            .order_by(OptionColumn::Id, Order::Asc)
            .to_owned()
    }

    fn delete(&self) -> DeleteStatement {
        Query::delete().from_table(Alias::new(self.table)).to_owned()
    }

    fn upsert(&self, record: &OptionRecord) -> Result<InsertStatement, ServiceError> {
        let row = OptionRow::from(record);
        let mut insert = Query::insert();
        insert
            .into_table(Alias::new(self.table))
            .columns(OptionColumn::ALL)
            .values([
                row.id.into(),
                row.name.into(),
                row.description.into(),
                row.created_at.into(),
                row.updated_at.into(),
                row.deleted_at.into(),
            ])
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .on_conflict(
                OnConflict::column(OptionColumn::Id)
                    .update_columns(OptionColumn::MUTABLE)
                    .to_owned(),
            );
        Ok(insert)
    }

    async fn fetch(&self, query: SelectStatement) -> Result<Vec<OptionRecord>, ServiceError> {
        let stmt = self.db.get_database_backend().build(&query);
        let rows = OptionRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(OptionRecord::from).collect())
    }
}

fn id_values(ids: &[RecordId]) -> Vec<String> {
    ids.iter().map(|id| id.as_str().to_string()).collect()
}

#[async_trait]
impl OptionRepository for SeaOrmOptionRepository {
    async fn save(&self, record: OptionRecord) -> Result<OptionRecord, ServiceError> {
        let stmt = self.db.get_database_backend().build(&self.upsert(&record)?);
        self.db.execute(stmt).await?;
        Ok(record)
    }

    async fn save_all(&self, records: Vec<OptionRecord>) -> Result<Vec<OptionRecord>, ServiceError> {
        let backend = self.db.get_database_backend();
        // Dropping the transaction on an early return rolls it back
        let txn = self.db.begin().await?;
        for record in &records {
            txn.execute(backend.build(&self.upsert(record)?)).await?;
        }
        txn.commit().await?;
        Ok(records)
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<OptionRecord>, ServiceError> {
        let query = self
            .select()
            .and_where(Expr::col(OptionColumn::Id).eq(id.as_str()))
            .limit(1)
            .to_owned();
        Ok(self.fetch(query).await?.into_iter().next())
    }

    async fn find_all_by_id(&self, ids: &[RecordId]) -> Result<Vec<OptionRecord>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = self
            .select()
            .and_where(Expr::col(OptionColumn::Id).is_in(id_values(ids)))
            .to_owned();
        self.fetch(query).await
    }

    async fn find_by_deleted_at_is_null(&self) -> Result<Vec<OptionRecord>, ServiceError> {
        let query = self.select().and_where(Expr::col(OptionColumn::DeletedAt).is_null()).to_owned();
        self.fetch(query).await
    }

    async fn find_all(&self) -> Result<Vec<OptionRecord>, ServiceError> {
        self.fetch(self.select()).await
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let query = self
            .select()
            .and_where(Expr::col(OptionColumn::Name).eq(name))
            .and_where(Expr::col(OptionColumn::DeletedAt).is_null())
            .limit(1)
            .to_owned();
        Ok(!self.fetch(query).await?.is_empty())
    }

    async fn exists_by_id(&self, id: &RecordId) -> Result<bool, ServiceError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn delete_by_id(&self, id: &RecordId) -> Result<bool, ServiceError> {
        let stmt = self.delete().and_where(Expr::col(OptionColumn::Id).eq(id.as_str())).to_owned();
        let res = self.db.execute(self.db.get_database_backend().build(&stmt)).await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_all_by_id(&self, ids: &[RecordId]) -> Result<u64, ServiceError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let stmt = self.delete().and_where(Expr::col(OptionColumn::Id).is_in(id_values(ids))).to_owned();
        let res = self.db.execute(self.db.get_database_backend().build(&stmt)).await?;
        Ok(res.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let res = self.db.execute(self.db.get_database_backend().build(&self.delete())).await?;
        Ok(res.rows_affected())
    }
}
