use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

/// A student row. `group_number` refers to `"group".group_number` by value;
/// there is no FK behind it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub age: i32,
    pub group_number: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_full_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("full_name required".into()));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), errors::ModelError> {
    if age <= 0 { return Err(errors::ModelError::Validation("age must be > 0".into())); }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

/// Field rules applied on both create and update.
pub fn validate(
    full_name: &str,
    age: i32,
    group_number: &str,
    email: &str,
) -> Result<(), errors::ModelError> {
    validate_full_name(full_name)?;
    validate_age(age)?;
    crate::group::validate_group_number(group_number)?;
    validate_email(email)?;
    Ok(())
}
