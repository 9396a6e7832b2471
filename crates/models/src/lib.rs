//! sea-orm entities for the `"group"` and `student` tables, field rules, and
//! the process-wide connection pool.

pub mod errors;
pub mod db;
pub mod group;
pub mod student;
