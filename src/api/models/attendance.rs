//! API request/response models for attendance.

use crate::{
    db::models::attendance::AttendanceDBResponse,
    types::{AttendanceId, GroupId, StudentId, UserId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceCreate {
    /// Group whose session is being recorded (required, validated in the handler)
    pub group_id: Option<GroupId>,
    /// Date of the session (required, validated in the handler)
    pub session_date: Option<NaiveDate>,
    /// Students who attended; roster members not listed are marked absent
    #[serde(default)]
    pub present_students: Vec<StudentId>,
    /// Comment applied to every row written by this submission
    #[serde(default)]
    pub trainer_comment: String,
    /// Trainer submitting the sheet, recorded as the charge creator
    pub trainer_id: Option<UserId>,
}

/// Query parameters for listing attendance. `student_id` takes precedence
/// when both filters are given.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    pub student_id: Option<StudentId>,
    pub group_id: Option<GroupId>,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecordResponse {
    pub id: AttendanceId,
    pub student_id: StudentId,
    pub group_id: GroupId,
    pub session_date: NaiveDate,
    pub is_present: bool,
    pub trainer_comment: Option<String>,
    /// Amount charged for this session; 0 for absences and uncharged rows
    pub cost_charged: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceListResponse {
    pub attendance: Vec<AttendanceRecordResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceMarkedResponse {
    pub success: bool,
    pub message: String,
}

impl From<AttendanceDBResponse> for AttendanceRecordResponse {
    fn from(db: AttendanceDBResponse) -> Self {
        Self {
            id: db.id,
            student_id: db.student_id,
            group_id: db.group_id,
            session_date: db.session_date,
            is_present: db.is_present,
            trainer_comment: db.trainer_comment,
            cost_charged: db.cost_charged,
            student_name: db.student_name,
            group_name: db.group_name,
        }
    }
}
