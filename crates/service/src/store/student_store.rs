use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QueryResult, QueryTrait, Select, Set, TransactionTrait,
};

use models::student;

use crate::domain::StudentData;

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert and read the new row back by email.
    async fn create(&self, data: &StudentData) -> Result<Option<QueryResult>, DbErr>;
    async fn get_all(&self) -> Result<Vec<QueryResult>, DbErr>;
    async fn get_by_id(&self, id: i32) -> Result<Option<QueryResult>, DbErr>;
    async fn get_by_email(&self, email: &str) -> Result<Option<QueryResult>, DbErr>;
    /// Full-field overwrite, then read the row back by id.
    async fn update(&self, id: i32, data: &StudentData) -> Result<Option<QueryResult>, DbErr>;
    async fn delete_by_id(&self, id: i32) -> Result<u64, DbErr>;
}

#[derive(Clone)]
pub struct SeaOrmStudentStore {
    db: DatabaseConnection,
}

impl SeaOrmStudentStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn by_id(id: i32) -> Select<student::Entity> {
    student::Entity::find().filter(student::Column::Id.eq(id))
}

fn by_email(email: &str) -> Select<student::Entity> {
    student::Entity::find().filter(student::Column::Email.eq(email))
}

#[async_trait]
impl StudentStore for SeaOrmStudentStore {
    async fn create(&self, data: &StudentData) -> Result<Option<QueryResult>, DbErr> {
        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();
        let am = student::ActiveModel {
            id: NotSet,
            full_name: Set(data.full_name.clone()),
            age: Set(data.age),
            group_number: Set(data.group_number.clone()),
            email: Set(data.email.clone()),
        };
        txn.execute(student::Entity::insert(am).build(backend)).await?;
        let row = txn.query_one(by_email(&data.email).build(backend)).await?;
        txn.commit().await?;
        Ok(row)
    }

    async fn get_all(&self) -> Result<Vec<QueryResult>, DbErr> {
        let stmt = student::Entity::find()
            .order_by_asc(student::Column::Id)
            .build(self.db.get_database_backend());
        self.db.query_all(stmt).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<QueryResult>, DbErr> {
        self.db.query_one(by_id(id).build(self.db.get_database_backend())).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<QueryResult>, DbErr> {
        self.db.query_one(by_email(email).build(self.db.get_database_backend())).await
    }

    async fn update(&self, id: i32, data: &StudentData) -> Result<Option<QueryResult>, DbErr> {
        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();
        let stmt = student::Entity::update_many()
            .col_expr(student::Column::FullName, Expr::value(data.full_name.clone()))
            .col_expr(student::Column::Age, Expr::value(data.age))
            .col_expr(student::Column::GroupNumber, Expr::value(data.group_number.clone()))
            .col_expr(student::Column::Email, Expr::value(data.email.clone()))
            .filter(student::Column::Id.eq(id))
            .build(backend);
        txn.execute(stmt).await?;
        let row = txn.query_one(by_id(id).build(backend)).await?;
        txn.commit().await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, DbErr> {
        let stmt = student::Entity::delete_many()
            .filter(student::Column::Id.eq(id))
            .build(self.db.get_database_backend());
        Ok(self.db.execute(stmt).await?.rows_affected())
    }
}
