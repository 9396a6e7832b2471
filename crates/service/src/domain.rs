//! Domain entities handed out by the consistency services.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i32,
    pub group_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    pub full_name: String,
    pub age: i32,
    pub group_number: String,
    pub email: String,
}

/// Every student field except the store-assigned id. Used for both create
/// and the full-replace update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentData {
    pub full_name: String,
    pub age: i32,
    pub group_number: String,
    pub email: String,
}

impl From<models::group::Model> for Group {
    fn from(m: models::group::Model) -> Self {
        Self { id: m.id, group_number: m.group_number }
    }
}

impl From<models::student::Model> for Student {
    fn from(m: models::student::Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            age: m.age,
            group_number: m.group_number,
            email: m.email,
        }
    }
}
