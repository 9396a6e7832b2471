//! Store adapters: CRUD statements against the relational backend.
//!
//! Adapters hold no business rules. They return raw [`sea_orm::QueryResult`]
//! rows and [`sea_orm::DbErr`]s untouched; classification happens in the
//! consistency services through [`crate::mapper`].

pub mod group_store;
pub mod student_store;

pub use group_store::{GroupStore, SeaOrmGroupStore};
pub use student_store::{SeaOrmStudentStore, StudentStore};
