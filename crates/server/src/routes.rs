use std::{sync::Arc, time::Duration};

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::store::{SeaOrmGroupStore, SeaOrmStudentStore};
use service::{GroupService, StudentService};

use crate::openapi::ApiDoc;

pub mod groups;
pub mod students;

pub type Groups = GroupService<SeaOrmGroupStore>;
pub type Students = StudentService<SeaOrmStudentStore, SeaOrmGroupStore>;

/// Shared handler state. Built once at startup; cloning only bumps the `Arc`s.
#[derive(Clone)]
pub struct ServerState {
    pub groups: Arc<Groups>,
    pub students: Arc<Students>,
}

impl ServerState {
    /// Wire adapters into services: both adapters share the one pool, and the
    /// student service gets the same group service the handlers use.
    pub fn new(db: DatabaseConnection) -> Self {
        let group_store = Arc::new(SeaOrmGroupStore::new(db.clone()));
        let student_store = Arc::new(SeaOrmStudentStore::new(db));
        let groups = Arc::new(GroupService::new(group_store));
        let students = Arc::new(StudentService::new(student_store, Arc::clone(&groups)));
        Self { groups, students }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "OK", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/groups", get(groups::list).post(groups::create))
        .route(
            "/groups/:id",
            get(groups::get).put(groups::update).delete(groups::delete),
        )
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/:id",
            get(students::get).put(students::update).delete(students::delete),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                        .make_span_with(
                            DefaultMakeSpan::new().level(Level::INFO).include_headers(false),
                        )
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        // 响应返回时打点，包含状态码与耗时
                        .on_response(
                            DefaultOnResponse::new().level(Level::INFO).include_headers(false),
                        )
                        // 失败（5xx 等）时以 ERROR 记录
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                // 超时后丢弃请求 future，进行中的数据库调用随之取消
                .layer(TimeoutLayer::new(request_timeout))
                .layer(cors),
        )
}
