// src/domain/user.rs
use serde::{Deserialize, Serialize};

/// The acting user recorded in audit entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 1,
            full_name: "admin".to_string(),
            email: String::new(),
        }
    }
}
