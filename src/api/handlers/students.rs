//! HTTP handlers for student endpoints.

use crate::{
    AppState,
    api::models::students::{StudentCreate, StudentCreatedResponse, StudentListResponse, StudentResponse},
    auth::{credentials, password},
    db::{
        handlers::{Repository, Students, students::StudentFilter},
        models::students::StudentCreateDBRequest,
    },
    errors::{Error, Result},
};
use axum::{extract::State, http::StatusCode, response::Json};

/// List all students
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    summary = "List students",
    description = "All students with group name, balance, and attendance percentage, ordered by name",
    responses(
        (status = 200, description = "List of students", body = StudentListResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<StudentListResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let students = repo.list(&StudentFilter::default()).await?;

    Ok(Json(StudentListResponse {
        students: students.into_iter().map(StudentResponse::from).collect(),
    }))
}

/// Create a new student with generated credentials
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    summary = "Create a student",
    description = "Creates the linked identity and profile rows and returns the generated login \
                   and temporary password. The password is returned exactly once.",
    request_body = StudentCreate,
    responses(
        (status = 201, description = "Student created", body = StudentCreatedResponse),
        (status = 400, description = "Bad request - full name is missing"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(data): Json<StudentCreate>,
) -> Result<(StatusCode, Json<StudentCreatedResponse>)> {
    let full_name = data.full_name.as_deref().map(str::trim).unwrap_or_default();
    if full_name.is_empty() {
        return Err(Error::BadRequest {
            message: "Student full name is required".to_string(),
        });
    }

    let login = credentials::generate_login();
    let temp_password = credentials::generate_temp_password();
    let password_hash = password::hash_string(&temp_password)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let db_request = StudentCreateDBRequest {
        login: login.clone(),
        password_hash,
        full_name: full_name.to_string(),
        birth_date: data.birth_date,
        parent_contact: data.parent_contact.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string),
        group_id: data.group_id,
    };

    let student = repo.create(&db_request).await?;

    Ok((
        StatusCode::CREATED,
        Json(StudentCreatedResponse {
            success: true,
            student_id: student.id,
            login,
            temp_password,
            message: "Student created. Hand the login and password to the parent.".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_student_returns_one_time_credentials(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let group = create_test_group(&pool, None, 300).await;

        let response = app
            .post("/api/v1/students")
            .json(&json!({
                "full_name": "Ivan Petrov",
                "birth_date": "2015-06-01",
                "parent_contact": "+7 900 000-00-00",
                "group_id": group.id
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: StudentCreatedResponse = response.json();
        assert!(body.success);
        assert!(body.login.starts_with("sambokid_"));
        assert_eq!(body.temp_password.len(), 8);

        // Only the argon2 hash is persisted, and it verifies the plaintext
        let stored_hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE login = $1")
            .bind(&body.login)
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch password hash");
        assert_ne!(stored_hash, body.temp_password);
        assert!(password::verify_string(&body.temp_password, &stored_hash).unwrap());

        // Profile row is linked and starts with a zero balance
        let balance = student_balance(&pool, body.student_id).await;
        assert_eq!(balance, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_student_requires_full_name(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.post("/api/v1/students").json(&json!({ "parent_contact": "+7 900" })).await;
        response.assert_status_bad_request();

        let response = app.post("/api/v1/students").json(&json!({ "full_name": "  " })).await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_students_computes_attendance_percentage(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let group = create_test_group(&pool, None, 300).await;
        let regular = create_test_student(&pool, Some(group.id)).await;
        let newcomer = create_test_student(&pool, Some(group.id)).await;

        // Three recorded sessions, two attended
        for (date, present) in [("2026-03-02", true), ("2026-03-04", true), ("2026-03-06", false)] {
            sqlx::query(
                "INSERT INTO attendance (student_id, group_id, session_date, is_present, cost_charged)
                 VALUES ($1, $2, $3::DATE, $4, 0)",
            )
            .bind(regular.id)
            .bind(group.id)
            .bind(date)
            .bind(present)
            .execute(&pool)
            .await
            .expect("Failed to insert attendance");
        }

        let response = app.get("/api/v1/students").await;
        response.assert_status_ok();
        let body: StudentListResponse = response.json();

        let regular_row = body.students.iter().find(|s| s.id == regular.id).expect("regular student listed");
        assert_eq!(regular_row.total_sessions, 3);
        assert_eq!(regular_row.total_visits, 2);
        assert_eq!(regular_row.attendance_percentage, 67);
        assert_eq!(regular_row.group_name.as_deref(), Some(group.name.as_str()));

        let newcomer_row = body.students.iter().find(|s| s.id == newcomer.id).expect("newcomer listed");
        assert_eq!(newcomer_row.total_sessions, 0);
        assert_eq!(newcomer_row.attendance_percentage, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unsupported_method_returns_405(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.put("/api/v1/students").json(&json!({})).await;
        response.assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
