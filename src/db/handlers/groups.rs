//! Database repository for training groups.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::groups::{GroupCreateDBRequest, GroupDBResponse},
};
use crate::types::GroupId;
use sqlx::PgConnection;
use tracing::instrument;

/// Joined projection used by every read: group columns plus the trainer's
/// name and the current roster size.
const GROUP_SELECT: &str = r#"
    SELECT g.id, g.name, g.trainer_id, g.schedule, g.cost_per_session, g.is_archived, g.created_at,
           u.full_name AS trainer_name,
           (SELECT COUNT(*) FROM students s WHERE s.group_id = g.id) AS student_count
    FROM groups g
    LEFT JOIN users u ON g.trainer_id = u.id
"#;

/// Filter for listing groups
#[derive(Debug, Clone, Copy)]
pub struct GroupFilter {
    pub include_archived: bool,
}

impl GroupFilter {
    /// Only groups that are still running.
    pub fn active() -> Self {
        Self { include_archived: false }
    }
}

pub struct Groups<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Groups<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for Groups<'_> {
    type CreateRequest = GroupCreateDBRequest;
    type Response = GroupDBResponse;
    type Id = GroupId;
    type Filter = GroupFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let id: GroupId = sqlx::query_scalar(
            r#"
            INSERT INTO groups (name, trainer_id, schedule, cost_per_session)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&request.name)
        .bind(request.trainer_id)
        .bind(&request.schedule)
        .bind(request.cost_per_session)
        .fetch_one(&mut *self.db)
        .await?;

        // Re-read through the joined projection so the response carries
        // trainer_name and student_count like every other read.
        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(group_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let sql = format!("{GROUP_SELECT} WHERE g.id = $1");
        let group = sqlx::query_as::<_, GroupDBResponse>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(group)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let sql = format!("{GROUP_SELECT} WHERE (g.is_archived = FALSE OR $1) ORDER BY g.created_at DESC");
        let groups = sqlx::query_as::<_, GroupDBResponse>(&sql)
            .bind(filter.include_archived)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(groups)
    }
}
