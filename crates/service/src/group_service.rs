use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::group;
use sea_orm::DbErr;

use crate::domain::Group;
use crate::errors::ServiceError;
use crate::mapper::{self, RowError};
use crate::store::GroupStore;

const GROUP: &str = "group";

fn store_fault(e: DbErr) -> ServiceError {
    ServiceError::from_store(GROUP, e)
}

fn row_fault(e: RowError) -> ServiceError {
    ServiceError::from_row(GROUP, e)
}

/// Application service owning group uniqueness and existence checks.
pub struct GroupService<S: GroupStore> {
    store: Arc<S>,
}

impl<S: GroupStore> GroupService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Create a group. Fails with `AlreadyExists` when the number is taken,
    /// either by the pre-check or by the unique index at write time.
    #[instrument(skip(self))]
    pub async fn create(&self, group_number: &str) -> Result<Group, ServiceError> {
        group::validate_group_number(group_number)?;
        if self.exists_by_number(group_number).await? {
            warn!(%group_number, "group already exists");
            return Err(ServiceError::AlreadyExists(GROUP));
        }
        let row = self.store.create(group_number).await.map_err(store_fault)?;
        let created = mapper::map_one_group(row).map_err(row_fault)?;
        info!(id = created.id, group_number = %created.group_number, "created group");
        Ok(created)
    }

    /// All groups by ascending id.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Group>, ServiceError> {
        let rows = self.store.get_all().await.map_err(store_fault)?;
        let groups = mapper::map_many_groups(rows).map_err(row_fault)?;
        info!(count = groups.len(), "listed groups");
        Ok(groups)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Group, ServiceError> {
        let row = self.store.get_by_id(id).await.map_err(store_fault)?;
        mapper::map_one_group(row).map_err(row_fault)
    }

    /// Rename one group. Students keep the old number; the reference is by value.
    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, group_number: &str) -> Result<Group, ServiceError> {
        group::validate_group_number(group_number)?;
        if !self.exists_by_id(id).await? {
            warn!(id, "group doesn't exist");
            return Err(ServiceError::not_found(GROUP));
        }
        let row = self.store.update(id, group_number).await.map_err(store_fault)?;
        let updated = mapper::map_one_group(row).map_err(row_fault)?;
        info!(id = updated.id, group_number = %updated.group_number, "updated group");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.exists_by_id(id).await? {
            warn!(id, "group doesn't exist");
            return Err(ServiceError::not_found(GROUP));
        }
        self.store.delete_by_id(id).await.map_err(store_fault)?;
        info!(id, "deleted group");
        Ok(())
    }

    /// `Ok(false)` only when the store positively reports no row; store and
    /// decode failures are returned as errors.
    #[instrument(skip(self))]
    pub async fn exists_by_number(&self, group_number: &str) -> Result<bool, ServiceError> {
        let row = self.store.get_by_group_number(group_number).await.map_err(store_fault)?;
        presence(mapper::map_one_group(row))
    }

    #[instrument(skip(self))]
    pub async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let row = self.store.get_by_id(id).await.map_err(store_fault)?;
        presence(mapper::map_one_group(row))
    }
}

pub(crate) fn presence<T>(mapped: Result<T, RowError>) -> Result<bool, ServiceError> {
    match mapped {
        Ok(_) => Ok(true),
        Err(RowError::NotFound) => Ok(false),
        Err(RowError::Decode(msg)) => Err(ServiceError::Decode(msg)),
    }
}
