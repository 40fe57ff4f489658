//! Database models for identity records.

use serde::{Deserialize, Serialize};

/// Actor role stored as TEXT in the `users` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Trainer,
    Student,
}
