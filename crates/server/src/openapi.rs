use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct GroupDoc { pub id: i32, pub group_number: String }

#[derive(ToSchema)]
pub struct GroupInputDoc { pub group_number: String }

#[derive(ToSchema)]
pub struct GroupBodyDoc { pub group: GroupDoc }

#[derive(ToSchema)]
pub struct GroupsBodyDoc { pub groups: Vec<GroupDoc> }

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: i32,
    pub full_name: String,
    pub age: i32,
    pub group_number: String,
    pub email: String,
}

/// Body for both create and full-replace update.
#[derive(ToSchema)]
pub struct StudentInputDoc {
    pub full_name: String,
    pub age: i32,
    pub group_number: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct StudentBodyDoc { pub student: StudentDoc }

#[derive(ToSchema)]
pub struct StudentsBodyDoc { pub students: Vec<StudentDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::groups::list,
        crate::routes::groups::create,
        crate::routes::groups::get,
        crate::routes::groups::update,
        crate::routes::groups::delete,
        crate::routes::students::list,
        crate::routes::students::create,
        crate::routes::students::get,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            GroupDoc,
            GroupInputDoc,
            GroupBodyDoc,
            GroupsBodyDoc,
            StudentDoc,
            StudentInputDoc,
            StudentBodyDoc,
            StudentsBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "groups"),
        (name = "students")
    )
)]
pub struct ApiDoc;
