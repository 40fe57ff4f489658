//! Database repository for attendance records.
//!
//! The write path is the session sweep: one call marks presence for a whole
//! roster and charges newly-present students, all inside a single
//! transaction so a mid-sweep failure leaves no partial charges.

use crate::db::{
    errors::Result,
    models::{
        attendance::{AttendanceDBResponse, SessionOutcomeDBResponse, SessionRecordDBRequest},
        transactions::TransactionType,
    },
};
use crate::types::{GroupId, StudentId};
use sqlx::{Connection, PgConnection};
use tracing::instrument;

/// Filter for listing attendance history. `student_id` wins when both are
/// set, mirroring the API's query-parameter precedence.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttendanceFilter {
    pub student_id: Option<StudentId>,
    pub group_id: Option<GroupId>,
}

pub struct Attendance<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Attendance<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Record one training session for a whole group.
    ///
    /// Every roster student gets an attendance row for the session date;
    /// re-submission overwrites presence and comment on the existing row.
    /// A present student is charged once per date: the upsert preserves
    /// `cost_charged` on conflict, and the charge (cost onto the row,
    /// balance decrement, ledger append) only runs when no prior charge
    /// exists. The whole sweep commits atomically.
    #[instrument(
        skip(self, request),
        fields(group_id = request.group_id, session_date = %request.session_date, present = request.present.len()),
        err
    )]
    pub async fn record_session(&mut self, request: &SessionRecordDBRequest) -> Result<SessionOutcomeDBResponse> {
        let mut tx = self.db.begin().await?;

        let roster: Vec<StudentId> = sqlx::query_scalar("SELECT id FROM students WHERE group_id = $1")
            .bind(request.group_id)
            .fetch_all(&mut *tx)
            .await?;

        let mut charged = 0usize;

        for &student_id in &roster {
            // Present iff listed; ids outside the roster never reach this loop.
            let is_present = request.present.contains(&student_id);

            let prior_charge: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO attendance (student_id, group_id, session_date, is_present, trainer_comment, cost_charged)
                VALUES ($1, $2, $3, $4, $5, 0)
                ON CONFLICT (student_id, group_id, session_date)
                DO UPDATE SET is_present = EXCLUDED.is_present, trainer_comment = EXCLUDED.trainer_comment
                RETURNING cost_charged
                "#,
            )
            .bind(student_id)
            .bind(request.group_id)
            .bind(request.session_date)
            .bind(is_present)
            .bind(&request.trainer_comment)
            .fetch_one(&mut *tx)
            .await?;

            // One charge per (student, group, date): a row that already
            // carries a charge is never charged again.
            if is_present && prior_charge == 0 && request.cost > 0 {
                sqlx::query(
                    "UPDATE attendance SET cost_charged = $1 WHERE student_id = $2 AND group_id = $3 AND session_date = $4",
                )
                .bind(request.cost)
                .bind(student_id)
                .bind(request.group_id)
                .bind(request.session_date)
                .execute(&mut *tx)
                .await?;

                sqlx::query("UPDATE students SET balance = balance - $1 WHERE id = $2")
                    .bind(request.cost)
                    .bind(student_id)
                    .execute(&mut *tx)
                    .await?;

                sqlx::query(
                    r#"
                    INSERT INTO transactions (student_id, amount, transaction_type, description, created_by)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(student_id)
                .bind(-request.cost)
                .bind(TransactionType::Charge)
                .bind(format!("Session on {}", request.session_date))
                .bind(request.trainer_id)
                .execute(&mut *tx)
                .await?;

                charged += 1;
            }
        }

        tx.commit().await?;

        Ok(SessionOutcomeDBResponse {
            marked: roster.len(),
            charged,
        })
    }

    /// List attendance history, newest first.
    #[instrument(skip(self, filter), err)]
    pub async fn list(&mut self, filter: &AttendanceFilter) -> Result<Vec<AttendanceDBResponse>> {
        let records = if let Some(student_id) = filter.student_id {
            sqlx::query_as::<_, AttendanceDBResponse>(
                r#"
                SELECT a.*, g.name AS group_name
                FROM attendance a
                JOIN groups g ON a.group_id = g.id
                WHERE a.student_id = $1
                ORDER BY a.session_date DESC
                LIMIT 100
                "#,
            )
            .bind(student_id)
            .fetch_all(&mut *self.db)
            .await?
        } else if let Some(group_id) = filter.group_id {
            sqlx::query_as::<_, AttendanceDBResponse>(
                r#"
                SELECT a.*, u.full_name AS student_name
                FROM attendance a
                JOIN students s ON a.student_id = s.id
                JOIN users u ON s.user_id = u.id
                WHERE a.group_id = $1
                ORDER BY a.session_date DESC, u.full_name
                LIMIT 500
                "#,
            )
            .bind(group_id)
            .fetch_all(&mut *self.db)
            .await?
        } else {
            sqlx::query_as::<_, AttendanceDBResponse>(
                r#"
                SELECT a.*, u.full_name AS student_name, g.name AS group_name
                FROM attendance a
                JOIN students s ON a.student_id = s.id
                JOIN users u ON s.user_id = u.id
                JOIN groups g ON a.group_id = g.id
                ORDER BY a.session_date DESC
                LIMIT 100
                "#,
            )
            .fetch_all(&mut *self.db)
            .await?
        };

        Ok(records)
    }
}
