//! Row mapping: raw query results to domain entities.
//!
//! An absent row (`None`) is reported as [`RowError::NotFound`]; a row that
//! exists but does not fit the entity is [`RowError::Decode`]. The two must
//! stay distinct, callers turn the first into a 404 and the second into a 500.

use sea_orm::{FromQueryResult, QueryResult};
use thiserror::Error;

use crate::domain::{Group, Student};
use models::{group, student};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("no rows in result set")]
    NotFound,
    #[error("cannot decode row: {0}")]
    Decode(String),
}

fn map_one<M: FromQueryResult>(row: Option<QueryResult>) -> Result<M, RowError> {
    let row = row.ok_or(RowError::NotFound)?;
    M::from_query_result(&row, "").map_err(|e| RowError::Decode(e.to_string()))
}

fn map_many<M: FromQueryResult>(rows: Vec<QueryResult>) -> Result<Vec<M>, RowError> {
    rows.iter()
        .map(|row| M::from_query_result(row, "").map_err(|e| RowError::Decode(e.to_string())))
        .collect()
}

pub fn map_one_group(row: Option<QueryResult>) -> Result<Group, RowError> {
    map_one::<group::Model>(row).map(Group::from)
}

pub fn map_many_groups(rows: Vec<QueryResult>) -> Result<Vec<Group>, RowError> {
    Ok(map_many::<group::Model>(rows)?.into_iter().map(Group::from).collect())
}

pub fn map_one_student(row: Option<QueryResult>) -> Result<Student, RowError> {
    map_one::<student::Model>(row).map(Student::from)
}

pub fn map_many_students(rows: Vec<QueryResult>) -> Result<Vec<Student>, RowError> {
    Ok(map_many::<student::Model>(rows)?.into_iter().map(Student::from).collect())
}
