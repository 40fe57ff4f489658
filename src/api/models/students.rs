//! API request/response models for students.

use crate::{
    db::models::students::StudentDBResponse,
    types::{GroupId, StudentId, UserId},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentCreate {
    /// Student's full name (required, validated in the handler)
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// Parent's phone or other contact
    pub parent_contact: Option<String>,
    /// Group to enroll the student into, if any
    pub group_id: Option<GroupId>,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: StudentId,
    pub user_id: UserId,
    pub group_id: Option<GroupId>,
    pub birth_date: Option<NaiveDate>,
    pub parent_contact: Option<String>,
    /// Cached running balance in whole currency units (may be negative)
    pub balance: i32,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub login: String,
    pub phone: Option<String>,
    pub group_name: Option<String>,
    pub total_visits: i64,
    pub total_sessions: i64,
    /// `round(100 * total_visits / total_sessions)`, 0 with no sessions
    pub attendance_percentage: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
}

/// Returned once on creation; `temp_password` is never persisted in
/// plaintext and cannot be recovered later.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentCreatedResponse {
    pub success: bool,
    pub student_id: StudentId,
    pub login: String,
    pub temp_password: String,
    pub message: String,
}

/// Share of attended sessions, rounded to whole percent. 0 when the student
/// has no recorded sessions.
pub fn attendance_percentage(visits: i64, sessions: i64) -> i32 {
    if sessions <= 0 {
        return 0;
    }
    ((visits as f64 / sessions as f64) * 100.0).round() as i32
}

impl From<StudentDBResponse> for StudentResponse {
    fn from(db: StudentDBResponse) -> Self {
        let attendance_percentage = attendance_percentage(db.total_visits, db.total_sessions);
        Self {
            id: db.id,
            user_id: db.user_id,
            group_id: db.group_id,
            birth_date: db.birth_date,
            parent_contact: db.parent_contact,
            balance: db.balance,
            created_at: db.created_at,
            full_name: db.full_name,
            login: db.login,
            phone: db.phone,
            group_name: db.group_name,
            total_visits: db.total_visits,
            total_sessions: db.total_sessions,
            attendance_percentage,
        }
    }
}
