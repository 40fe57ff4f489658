//! Database models for student profiles.
//!
//! A student is a profile row owning a 1:1 `users` row for identity; both
//! are created together during onboarding.

use crate::types::{GroupId, StudentId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database request for creating a student and its linked user row.
///
/// `password_hash` is the argon2 hash of the generated temporary password;
/// the plaintext never reaches the database layer.
#[derive(Debug, Clone)]
pub struct StudentCreateDBRequest {
    pub login: String,
    pub password_hash: String,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub parent_contact: Option<String>,
    pub group_id: Option<GroupId>,
}

/// Database response for a student, joined with identity fields, the group
/// name, and lifetime attendance counters.
#[derive(Debug, Clone, FromRow)]
pub struct StudentDBResponse {
    pub id: StudentId,
    pub user_id: UserId,
    pub group_id: Option<GroupId>,
    pub birth_date: Option<NaiveDate>,
    pub parent_contact: Option<String>,
    pub balance: i32,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub login: String,
    pub phone: Option<String>,
    pub group_name: Option<String>,
    pub total_visits: i64,
    pub total_sessions: i64,
}
