//! Database models for training groups.

use crate::types::{GroupId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new group
#[derive(Debug, Clone)]
pub struct GroupCreateDBRequest {
    pub name: String,
    pub trainer_id: Option<UserId>,
    pub schedule: Option<String>,
    pub cost_per_session: i32,
}

/// Database response for a group, including the joined trainer name and
/// the current roster size.
#[derive(Debug, Clone, FromRow)]
pub struct GroupDBResponse {
    pub id: GroupId,
    pub name: String,
    pub trainer_id: Option<UserId>,
    pub schedule: Option<String>,
    pub cost_per_session: i32,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub trainer_name: Option<String>,
    pub student_count: i64,
}
