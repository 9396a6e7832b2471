#![cfg(test)]
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, QueryResult};
use tracing::{span, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::store::GroupStore;

/// Fresh in-memory SQLite database with the real migrations applied.
/// Each call returns an isolated store.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // 内存库只存在于单个连接中，连接池必须固定为 1
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Records the name of every span opened while it is the default subscriber.
#[derive(Clone, Default)]
pub struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

impl SpanNames {
    pub fn names(&self) -> Vec<&'static str> {
        self.0.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl<S: Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        if let Ok(mut names) = self.0.lock() {
            names.push(attrs.metadata().name());
        }
    }
}

/// Group adapter whose backend is unreachable.
pub struct FailingGroupStore;

fn down() -> DbErr {
    DbErr::Custom("connection refused".into())
}

#[async_trait]
impl GroupStore for FailingGroupStore {
    async fn create(&self, _group_number: &str) -> Result<Option<QueryResult>, DbErr> {
        Err(down())
    }

    async fn get_all(&self) -> Result<Vec<QueryResult>, DbErr> {
        Err(down())
    }

    async fn get_by_id(&self, _id: i32) -> Result<Option<QueryResult>, DbErr> {
        Err(down())
    }

    async fn get_by_group_number(&self, _number: &str) -> Result<Option<QueryResult>, DbErr> {
        Err(down())
    }

    async fn update(&self, _id: i32, _group_number: &str) -> Result<Option<QueryResult>, DbErr> {
        Err(down())
    }

    async fn delete_by_id(&self, _id: i32) -> Result<u64, DbErr> {
        Err(down())
    }
}
