use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use service::Group;

use crate::openapi::{ErrorDoc, GroupBodyDoc, GroupInputDoc, GroupsBodyDoc};
use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Deserialize)]
pub struct GroupInput {
    pub group_number: String,
}

#[derive(Debug, Serialize)]
pub struct GroupBody {
    pub group: Group,
}

#[derive(Debug, Serialize)]
pub struct GroupsBody {
    pub groups: Vec<Group>,
}

#[utoipa::path(
    get, path = "/groups", tag = "groups",
    responses(
        (status = 200, description = "All groups by ascending id", body = GroupsBodyDoc),
        (status = 500, description = "List Failed", body = ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<GroupsBody>, JsonApiError> {
    let groups = state.groups.get_all().await?;
    Ok(Json(GroupsBody { groups }))
}

#[utoipa::path(
    post, path = "/groups", tag = "groups",
    request_body = GroupInputDoc,
    responses(
        (status = 201, description = "Created", body = GroupBodyDoc),
        (status = 400, description = "Validation Error", body = ErrorDoc),
        (status = 409, description = "Group number already used", body = ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<GroupInput>, JsonRejection>,
) -> Result<(StatusCode, Json<GroupBody>), JsonApiError> {
    let Json(input) = payload?;
    info!(group_number = %input.group_number, "group_create_request");
    let group = state.groups.create(&input.group_number).await?;
    Ok((StatusCode::CREATED, Json(GroupBody { group })))
}

#[utoipa::path(
    get, path = "/groups/{id}", tag = "groups",
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 200, description = "OK", body = GroupBodyDoc),
        (status = 400, description = "Malformed id", body = ErrorDoc),
        (status = 404, description = "Not Found", body = ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<GroupBody>, JsonApiError> {
    let Path(id) = id?;
    let group = state.groups.get_by_id(id).await?;
    Ok(Json(GroupBody { group }))
}

#[utoipa::path(
    put, path = "/groups/{id}", tag = "groups",
    params(("id" = i32, Path, description = "Group ID")),
    request_body = GroupInputDoc,
    responses(
        (status = 200, description = "Updated", body = GroupBodyDoc),
        (status = 400, description = "Validation Error", body = ErrorDoc),
        (status = 404, description = "Not Found", body = ErrorDoc),
        (status = 409, description = "Group number already used", body = ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<GroupInput>, JsonRejection>,
) -> Result<Json<GroupBody>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let group = state.groups.update(id, &input.group_number).await?;
    Ok(Json(GroupBody { group }))
}

#[utoipa::path(
    delete, path = "/groups/{id}", tag = "groups",
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = ErrorDoc),
        (status = 404, description = "Not Found", body = ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.groups.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
