//! Domain consistency and persistence-mapping layer.
//! - Store adapters issue CRUD statements and return raw rows.
//! - The row mapper turns rows into domain entities, keeping "no row" apart from "bad row".
//! - Consistency services own uniqueness and the student -> group reference check.

pub mod errors;
pub mod domain;
pub mod mapper;
pub mod store;
pub mod group_service;
pub mod student_service;
#[cfg(test)]
pub mod test_support;

pub use domain::{Group, Student, StudentData};
pub use errors::ServiceError;
pub use group_service::GroupService;
pub use student_service::StudentService;
