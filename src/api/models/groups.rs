//! API request/response models for training groups.

use crate::{
    db::models::groups::GroupDBResponse,
    types::{GroupId, UserId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default charge per attended session, in whole currency units.
pub const DEFAULT_COST_PER_SESSION: i32 = 300;

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupCreate {
    /// Group name (required, validated in the handler)
    pub name: Option<String>,
    /// Trainer running the group
    pub trainer_id: Option<UserId>,
    /// Free-form schedule description (e.g. "Mon/Wed/Fri 18:00")
    pub schedule: Option<String>,
    /// Charge per attended session; defaults to 300
    #[serde(default = "default_cost_per_session")]
    pub cost_per_session: i32,
}

fn default_cost_per_session() -> i32 {
    DEFAULT_COST_PER_SESSION
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupResponse {
    pub id: GroupId,
    pub name: String,
    pub trainer_id: Option<UserId>,
    pub schedule: Option<String>,
    pub cost_per_session: i32,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    /// Full name of the trainer, when one is assigned
    pub trainer_name: Option<String>,
    /// Number of students currently on the roster
    pub student_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupListResponse {
    pub groups: Vec<GroupResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupCreatedResponse {
    pub success: bool,
    pub group: GroupResponse,
}

impl From<GroupDBResponse> for GroupResponse {
    fn from(db: GroupDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            trainer_id: db.trainer_id,
            schedule: db.schedule,
            cost_per_session: db.cost_per_session,
            is_archived: db.is_archived,
            created_at: db.created_at,
            trainer_name: db.trainer_name,
            student_count: db.student_count,
        }
    }
}
