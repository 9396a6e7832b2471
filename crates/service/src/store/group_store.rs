use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QueryResult, QueryTrait, Select, Set, TransactionTrait,
};

use models::group;

#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Insert and read the new row back by its group number.
    async fn create(&self, group_number: &str) -> Result<Option<QueryResult>, DbErr>;
    async fn get_all(&self) -> Result<Vec<QueryResult>, DbErr>;
    async fn get_by_id(&self, id: i32) -> Result<Option<QueryResult>, DbErr>;
    async fn get_by_group_number(&self, group_number: &str) -> Result<Option<QueryResult>, DbErr>;
    /// Overwrite the number of one group and read the row back by id.
    async fn update(&self, id: i32, group_number: &str) -> Result<Option<QueryResult>, DbErr>;
    /// Returns the number of deleted rows.
    async fn delete_by_id(&self, id: i32) -> Result<u64, DbErr>;
}

/// SeaORM-backed group adapter sharing the process-wide pool.
#[derive(Clone)]
pub struct SeaOrmGroupStore {
    db: DatabaseConnection,
}

impl SeaOrmGroupStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn by_id(id: i32) -> Select<group::Entity> {
    group::Entity::find().filter(group::Column::Id.eq(id))
}

fn by_number(group_number: &str) -> Select<group::Entity> {
    group::Entity::find().filter(group::Column::GroupNumber.eq(group_number))
}

#[async_trait]
impl GroupStore for SeaOrmGroupStore {
    async fn create(&self, group_number: &str) -> Result<Option<QueryResult>, DbErr> {
        // insert 与回读在同一事务内，保证返回的就是刚写入的行
        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();
        let am = group::ActiveModel { id: NotSet, group_number: Set(group_number.to_string()) };
        txn.execute(group::Entity::insert(am).build(backend)).await?;
        let row = txn.query_one(by_number(group_number).build(backend)).await?;
        txn.commit().await?;
        Ok(row)
    }

    async fn get_all(&self) -> Result<Vec<QueryResult>, DbErr> {
        let stmt = group::Entity::find()
            .order_by_asc(group::Column::Id)
            .build(self.db.get_database_backend());
        self.db.query_all(stmt).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<QueryResult>, DbErr> {
        self.db.query_one(by_id(id).build(self.db.get_database_backend())).await
    }

    async fn get_by_group_number(&self, group_number: &str) -> Result<Option<QueryResult>, DbErr> {
        self.db.query_one(by_number(group_number).build(self.db.get_database_backend())).await
    }

    async fn update(&self, id: i32, group_number: &str) -> Result<Option<QueryResult>, DbErr> {
        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();
        let stmt = group::Entity::update_many()
            .col_expr(group::Column::GroupNumber, Expr::value(group_number.to_string()))
            .filter(group::Column::Id.eq(id))
            .build(backend);
        txn.execute(stmt).await?;
        let row = txn.query_one(by_id(id).build(backend)).await?;
        txn.commit().await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, DbErr> {
        let stmt = group::Entity::delete_many()
            .filter(group::Column::Id.eq(id))
            .build(self.db.get_database_backend());
        Ok(self.db.execute(stmt).await?.rows_affected())
    }
}
