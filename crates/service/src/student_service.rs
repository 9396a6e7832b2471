use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::student;
use sea_orm::DbErr;

use crate::domain::{Student, StudentData};
use crate::errors::ServiceError;
use crate::group_service::{presence, GroupService};
use crate::mapper::{self, RowError};
use crate::store::{GroupStore, StudentStore};

const STUDENT: &str = "student";

fn store_fault(e: DbErr) -> ServiceError {
    ServiceError::from_store(STUDENT, e)
}

fn row_fault(e: RowError) -> ServiceError {
    ServiceError::from_row(STUDENT, e)
}

/// Application service owning student uniqueness and the student -> group
/// referential check. Group existence is asked of the group service, never
/// of the group table directly.
pub struct StudentService<S: StudentStore, G: GroupStore> {
    store: Arc<S>,
    groups: Arc<GroupService<G>>,
}

impl<S: StudentStore, G: GroupStore> StudentService<S, G> {
    pub fn new(store: Arc<S>, groups: Arc<GroupService<G>>) -> Self { Self { store, groups } }

    /// Create a student.
    ///
    /// Checks run in order: field rules, email uniqueness (`AlreadyExists`),
    /// group reference (`GroupNotFound`). The returned entity is re-read
    /// from the store by email.
    #[instrument(skip(self, data), fields(email = %data.email, group_number = %data.group_number))]
    pub async fn create(&self, data: StudentData) -> Result<Student, ServiceError> {
        student::validate(&data.full_name, data.age, &data.group_number, &data.email)?;
        if self.exists_by_email(&data.email).await? {
            warn!("student already exists");
            return Err(ServiceError::AlreadyExists(STUDENT));
        }
        self.ensure_group(&data.group_number).await?;

        let row = self.store.create(&data).await.map_err(store_fault)?;
        let created = mapper::map_one_student(row).map_err(row_fault)?;
        info!(id = created.id, "created student");
        Ok(created)
    }

    /// All students by ascending id.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Student>, ServiceError> {
        let rows = self.store.get_all().await.map_err(store_fault)?;
        let students = mapper::map_many_students(rows).map_err(row_fault)?;
        info!(count = students.len(), "listed students");
        Ok(students)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Student, ServiceError> {
        let row = self.store.get_by_id(id).await.map_err(store_fault)?;
        mapper::map_one_student(row).map_err(row_fault)
    }

    /// Replace every field of an existing student.
    ///
    /// The new group reference is checked like on create. Taking another
    /// student's email is caught by the unique index and reported as
    /// `AlreadyExists`.
    #[instrument(skip(self, data), fields(group_number = %data.group_number))]
    pub async fn update(&self, id: i32, data: StudentData) -> Result<Student, ServiceError> {
        student::validate(&data.full_name, data.age, &data.group_number, &data.email)?;
        if !self.exists_by_id(id).await? {
            warn!(id, "student doesn't exist");
            return Err(ServiceError::not_found(STUDENT));
        }
        self.ensure_group(&data.group_number).await?;

        let row = self.store.update(id, &data).await.map_err(store_fault)?;
        let updated = mapper::map_one_student(row).map_err(row_fault)?;
        info!(id = updated.id, "updated student");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.exists_by_id(id).await? {
            warn!(id, "student doesn't exist");
            return Err(ServiceError::not_found(STUDENT));
        }
        self.store.delete_by_id(id).await.map_err(store_fault)?;
        info!(id, "deleted student");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let row = self.store.get_by_email(email).await.map_err(store_fault)?;
        presence(mapper::map_one_student(row))
    }

    #[instrument(skip(self))]
    pub async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let row = self.store.get_by_id(id).await.map_err(store_fault)?;
        presence(mapper::map_one_student(row))
    }

    async fn ensure_group(&self, group_number: &str) -> Result<(), ServiceError> {
        if !self.groups.exists_by_number(group_number).await? {
            warn!(%group_number, "group doesn't exist");
            return Err(ServiceError::GroupNotFound(group_number.to_string()));
        }
        Ok(())
    }
}
