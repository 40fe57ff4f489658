//! HTTP handlers for attendance endpoints.
//!
//! Recording a session marks presence for the whole roster and charges
//! newly-present students against their balance in one transaction.

use crate::{
    AppState,
    api::models::attendance::{
        AttendanceCreate, AttendanceListResponse, AttendanceMarkedResponse, AttendanceQuery, AttendanceRecordResponse,
    },
    db::{
        handlers::{Attendance, Groups, Repository, attendance::AttendanceFilter},
        models::attendance::SessionRecordDBRequest,
    },
    errors::{Error, Result},
};
use axum::{
    extract::{Query, State},
    response::Json,
};

/// Record attendance for one group session
#[utoipa::path(
    post,
    path = "/attendance",
    tag = "attendance",
    summary = "Record a session",
    description = "Marks every roster student present or absent for the date and charges present \
                   students the group's session cost. Re-submitting the same date overwrites \
                   presence and comment without charging twice.",
    request_body = AttendanceCreate,
    responses(
        (status = 200, description = "Attendance recorded", body = AttendanceMarkedResponse),
        (status = 400, description = "Bad request - group or session date missing"),
        (status = 404, description = "Group not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn record_attendance(
    State(state): State<AppState>,
    Json(data): Json<AttendanceCreate>,
) -> Result<Json<AttendanceMarkedResponse>> {
    let (Some(group_id), Some(session_date)) = (data.group_id, data.session_date) else {
        return Err(Error::BadRequest {
            message: "Group and session date are required".to_string(),
        });
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let group = Groups::new(&mut conn).get_by_id(group_id).await?.ok_or_else(|| Error::NotFound {
        resource: "Group".to_string(),
        id: group_id.to_string(),
    })?;

    let trainer_comment = Some(data.trainer_comment.trim()).filter(|s| !s.is_empty()).map(str::to_string);

    let outcome = Attendance::new(&mut conn)
        .record_session(&SessionRecordDBRequest {
            group_id,
            session_date,
            present: data.present_students.iter().copied().collect(),
            trainer_comment,
            trainer_id: data.trainer_id,
            cost: group.cost_per_session,
        })
        .await?;

    Ok(Json(AttendanceMarkedResponse {
        success: true,
        message: format!("Attendance recorded for {} students", outcome.marked),
    }))
}

/// List attendance history
#[utoipa::path(
    get,
    path = "/attendance",
    tag = "attendance",
    summary = "List attendance",
    description = "History filtered by student or group; student filter wins when both are given",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records", body = AttendanceListResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<AttendanceListResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Attendance::new(&mut conn);

    let records = repo
        .list(&AttendanceFilter {
            student_id: query.student_id,
            group_id: query.group_id,
        })
        .await?;

    Ok(Json(AttendanceListResponse {
        attendance: records.into_iter().map(AttendanceRecordResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::models::transactions::TransactionType,
        test_utils::*,
    };
    use serde_json::json;
    use sqlx::PgPool;

    const SESSION_DATE: &str = "2026-03-02";

    async fn transaction_count(pool: &PgPool, transaction_type: TransactionType) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE transaction_type = $1")
            .bind(transaction_type)
            .fetch_one(pool)
            .await
            .expect("Failed to count transactions")
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_present_students_are_charged_absent_are_not(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let trainer_id = create_test_trainer(&pool, "Coach Orlov").await;
        let group = create_test_group(&pool, Some(trainer_id), 300).await;
        let s1 = create_test_student(&pool, Some(group.id)).await;
        let s2 = create_test_student(&pool, Some(group.id)).await;
        let s3 = create_test_student(&pool, Some(group.id)).await;

        let response = app
            .post("/api/v1/attendance")
            .json(&json!({
                "group_id": group.id,
                "session_date": SESSION_DATE,
                "present_students": [s1.id, s3.id],
                "trainer_comment": "good session",
                "trainer_id": trainer_id
            }))
            .await;

        response.assert_status_ok();
        let body: AttendanceMarkedResponse = response.json();
        assert!(body.success);

        // Present students are charged the session cost, absent ones are not
        assert_eq!(student_balance(&pool, s1.id).await, -300);
        assert_eq!(student_balance(&pool, s2.id).await, 0);
        assert_eq!(student_balance(&pool, s3.id).await, -300);

        // Two charge rows of -300 appear on the ledger
        assert_eq!(transaction_count(&pool, TransactionType::Charge).await, 2);
        let amounts: Vec<i32> = sqlx::query_scalar("SELECT amount FROM transactions WHERE transaction_type = 'charge'")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert!(amounts.iter().all(|&a| a == -300));

        // The absent student's row carries no charge
        let (is_present, cost_charged): (bool, i32) =
            sqlx::query_as("SELECT is_present, cost_charged FROM attendance WHERE student_id = $1")
                .bind(s2.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(!is_present);
        assert_eq!(cost_charged, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_missing_fields_return_400_without_writes(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let group = create_test_group(&pool, None, 300).await;
        create_test_student(&pool, Some(group.id)).await;

        let response = app
            .post("/api/v1/attendance")
            .json(&json!({ "session_date": SESSION_DATE, "present_students": [] }))
            .await;
        response.assert_status_bad_request();

        let response = app.post("/api/v1/attendance").json(&json!({ "group_id": group.id })).await;
        response.assert_status_bad_request();

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance").fetch_one(&pool).await.unwrap();
        assert_eq!(rows, 0, "validation failures must not write");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unknown_group_returns_404(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app
            .post("/api/v1/attendance")
            .json(&json!({ "group_id": 4242, "session_date": SESSION_DATE }))
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_resubmission_overwrites_without_double_charge(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let trainer_id = create_test_trainer(&pool, "Coach Orlov").await;
        let group = create_test_group(&pool, Some(trainer_id), 300).await;
        let student = create_test_student(&pool, Some(group.id)).await;

        let submit = |comment: &str| {
            app.post("/api/v1/attendance").json(&json!({
                "group_id": group.id,
                "session_date": SESSION_DATE,
                "present_students": [student.id],
                "trainer_comment": comment,
                "trainer_id": trainer_id
            }))
        };

        submit("first pass").await.assert_status_ok();
        submit("corrected comment").await.assert_status_ok();

        // One row, updated in place
        let rows: Vec<(bool, i32, Option<String>)> =
            sqlx::query_as("SELECT is_present, cost_charged, trainer_comment FROM attendance WHERE student_id = $1")
                .bind(student.id)
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].0);
        assert_eq!(rows[0].1, 300);
        assert_eq!(rows[0].2.as_deref(), Some("corrected comment"));

        // Charged exactly once
        assert_eq!(student_balance(&pool, student.id).await, -300);
        assert_eq!(transaction_count(&pool, TransactionType::Charge).await, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_absent_then_present_charges_once(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let group = create_test_group(&pool, None, 300).await;
        let student = create_test_student(&pool, Some(group.id)).await;

        // First pass: nobody showed up
        app.post("/api/v1/attendance")
            .json(&json!({ "group_id": group.id, "session_date": SESSION_DATE, "present_students": [] }))
            .await
            .assert_status_ok();
        assert_eq!(student_balance(&pool, student.id).await, 0);
        assert_eq!(transaction_count(&pool, TransactionType::Charge).await, 0);

        // Correction: the student was actually there
        app.post("/api/v1/attendance")
            .json(&json!({ "group_id": group.id, "session_date": SESSION_DATE, "present_students": [student.id] }))
            .await
            .assert_status_ok();
        assert_eq!(student_balance(&pool, student.id).await, -300);
        assert_eq!(transaction_count(&pool, TransactionType::Charge).await, 1);

        // Idempotent from here on
        app.post("/api/v1/attendance")
            .json(&json!({ "group_id": group.id, "session_date": SESSION_DATE, "present_students": [student.id] }))
            .await
            .assert_status_ok();
        assert_eq!(student_balance(&pool, student.id).await, -300);
        assert_eq!(transaction_count(&pool, TransactionType::Charge).await, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_non_roster_ids_are_ignored(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let group = create_test_group(&pool, None, 300).await;
        let other_group = create_test_group(&pool, None, 300).await;
        let member = create_test_student(&pool, Some(group.id)).await;
        let outsider = create_test_student(&pool, Some(other_group.id)).await;

        let response = app
            .post("/api/v1/attendance")
            .json(&json!({
                "group_id": group.id,
                "session_date": SESSION_DATE,
                "present_students": [member.id, outsider.id, 9999]
            }))
            .await;
        response.assert_status_ok();

        // Only the roster member got a row and a charge
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance").fetch_one(&pool).await.unwrap();
        assert_eq!(rows, 1);
        assert_eq!(student_balance(&pool, member.id).await, -300);
        assert_eq!(student_balance(&pool, outsider.id).await, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_attendance_filters(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let group = create_test_group(&pool, None, 300).await;
        let other_group = create_test_group(&pool, None, 300).await;
        let s1 = create_test_student(&pool, Some(group.id)).await;
        let s2 = create_test_student(&pool, Some(other_group.id)).await;

        for (g, s) in [(&group, &s1), (&other_group, &s2)] {
            app.post("/api/v1/attendance")
                .json(&json!({ "group_id": g.id, "session_date": SESSION_DATE, "present_students": [s.id] }))
                .await
                .assert_status_ok();
        }

        // By group: rows carry the student's name
        let response = app.get(&format!("/api/v1/attendance?group_id={}", group.id)).await;
        response.assert_status_ok();
        let body: AttendanceListResponse = response.json();
        assert_eq!(body.attendance.len(), 1);
        assert_eq!(body.attendance[0].student_id, s1.id);
        assert!(body.attendance[0].student_name.is_some());

        // By student: rows carry the group's name
        let response = app.get(&format!("/api/v1/attendance?student_id={}", s2.id)).await;
        response.assert_status_ok();
        let body: AttendanceListResponse = response.json();
        assert_eq!(body.attendance.len(), 1);
        assert_eq!(body.attendance[0].group_name.as_deref(), Some(other_group.name.as_str()));

        // Unfiltered: everything
        let response = app.get("/api/v1/attendance").await;
        response.assert_status_ok();
        let body: AttendanceListResponse = response.json();
        assert_eq!(body.attendance.len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unsupported_method_returns_405(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.delete("/api/v1/attendance").await;
        response.assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
