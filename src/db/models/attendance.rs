//! Database models for attendance records and session sweeps.

use crate::types::{AttendanceId, GroupId, StudentId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::collections::HashSet;

/// Database request for recording one training session for a whole group.
#[derive(Debug, Clone)]
pub struct SessionRecordDBRequest {
    pub group_id: GroupId,
    pub session_date: NaiveDate,
    /// Students marked present; roster members absent from this set are
    /// recorded as absent. Ids outside the roster are ignored.
    pub present: HashSet<StudentId>,
    pub trainer_comment: Option<String>,
    pub trainer_id: Option<UserId>,
    /// Charge per attended session, from the group's `cost_per_session`.
    pub cost: i32,
}

/// Outcome of a session sweep.
#[derive(Debug, Clone, Copy)]
pub struct SessionOutcomeDBResponse {
    /// Roster size: number of attendance rows written or updated.
    pub marked: usize,
    /// Number of students newly charged for this date.
    pub charged: usize,
}

/// Database response for one attendance row.
///
/// `student_name` and `group_name` are populated only by the listing
/// queries that join them; other queries leave them `None`.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceDBResponse {
    pub id: AttendanceId,
    pub student_id: StudentId,
    pub group_id: GroupId,
    pub session_date: NaiveDate,
    pub is_present: bool,
    pub trainer_comment: Option<String>,
    pub cost_charged: i32,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub student_name: Option<String>,
    #[sqlx(default)]
    pub group_name: Option<String>,
}
