//! Database repository for student profiles.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::{
        students::{StudentCreateDBRequest, StudentDBResponse},
        users::Role,
    },
};
use crate::types::{GroupId, StudentId, UserId};
use sqlx::{Connection, PgConnection};
use tracing::instrument;

/// Joined projection: profile columns, the owning identity's fields, the
/// group name, and lifetime visit/session counters.
const STUDENT_SELECT: &str = r#"
    SELECT s.id, s.user_id, s.group_id, s.birth_date, s.parent_contact, s.balance, s.created_at,
           u.full_name, u.login, u.phone,
           g.name AS group_name,
           (SELECT COUNT(*) FROM attendance a WHERE a.student_id = s.id AND a.is_present = TRUE) AS total_visits,
           (SELECT COUNT(*) FROM attendance a WHERE a.student_id = s.id) AS total_sessions
    FROM students s
    JOIN users u ON s.user_id = u.id
    LEFT JOIN groups g ON s.group_id = g.id
"#;

/// Filter for listing students
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentFilter {
    pub group_id: Option<GroupId>,
}

pub struct Students<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Students<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for Students<'_> {
    type CreateRequest = StudentCreateDBRequest;
    type Response = StudentDBResponse;
    type Id = StudentId;
    type Filter = StudentFilter;

    /// Create the identity row and the student profile in one transaction.
    #[instrument(skip(self, request), fields(login = %request.login), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let mut tx = self.db.begin().await?;

        let user_id: UserId = sqlx::query_scalar(
            r#"
            INSERT INTO users (login, password_hash, role, full_name, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&request.login)
        .bind(&request.password_hash)
        .bind(Role::Student)
        .bind(&request.full_name)
        .bind(&request.parent_contact)
        .fetch_one(&mut *tx)
        .await?;

        let student_id: StudentId = sqlx::query_scalar(
            r#"
            INSERT INTO students (user_id, group_id, birth_date, parent_contact, balance)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(request.group_id)
        .bind(request.birth_date)
        .bind(&request.parent_contact)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_by_id(student_id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(student_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let sql = format!("{STUDENT_SELECT} WHERE s.id = $1");
        let student = sqlx::query_as::<_, StudentDBResponse>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(student)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let sql = format!("{STUDENT_SELECT} WHERE ($1::INTEGER IS NULL OR s.group_id = $1) ORDER BY u.full_name");
        let students = sqlx::query_as::<_, StudentDBResponse>(&sql)
            .bind(filter.group_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(students)
    }
}
