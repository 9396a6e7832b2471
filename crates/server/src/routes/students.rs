use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use service::{Student, StudentData};

use crate::openapi::{ErrorDoc, StudentBodyDoc, StudentInputDoc, StudentsBodyDoc};
use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Serialize)]
pub struct StudentBody {
    pub student: Student,
}

#[derive(Debug, Serialize)]
pub struct StudentsBody {
    pub students: Vec<Student>,
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses(
        (status = 200, description = "All students by ascending id", body = StudentsBodyDoc),
        (status = 500, description = "List Failed", body = ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<StudentsBody>, JsonApiError> {
    let students = state.students.get_all().await?;
    Ok(Json(StudentsBody { students }))
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = StudentInputDoc,
    responses(
        (status = 201, description = "Created", body = StudentBodyDoc),
        (status = 400, description = "Validation Error or unknown group", body = ErrorDoc),
        (status = 409, description = "Email already used", body = ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<StudentData>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentBody>), JsonApiError> {
    let Json(input) = payload?;
    info!(email = %input.email, group_number = %input.group_number, "student_create_request");
    let student = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(StudentBody { student })))
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "OK", body = StudentBodyDoc),
        (status = 400, description = "Malformed id", body = ErrorDoc),
        (status = 404, description = "Not Found", body = ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<StudentBody>, JsonApiError> {
    let Path(id) = id?;
    let student = state.students.get_by_id(id).await?;
    Ok(Json(StudentBody { student }))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StudentInputDoc,
    responses(
        (status = 200, description = "Updated", body = StudentBodyDoc),
        (status = 400, description = "Validation Error or unknown group", body = ErrorDoc),
        (status = 404, description = "Not Found", body = ErrorDoc),
        (status = 409, description = "Email already used", body = ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<StudentData>, JsonRejection>,
) -> Result<Json<StudentBody>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let student = state.students.update(id, input).await?;
    Ok(Json(StudentBody { student }))
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
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
    state.students.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
