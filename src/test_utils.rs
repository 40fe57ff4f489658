//! Test utilities for integration testing
//!
//! Fixtures insert rows through the same repositories the handlers use
//! wherever possible; identity rows for trainers are created directly since
//! there is no trainer-onboarding endpoint.

use crate::{
    Application,
    config::Config,
    db::{
        handlers::{Groups, Repository, Students},
        models::{
            groups::{GroupCreateDBRequest, GroupDBResponse},
            students::{StudentCreateDBRequest, StudentDBResponse},
        },
    },
    types::{GroupId, StudentId, UserId},
};
use axum_test::TestServer;
use sqlx::PgPool;

/// Fixture hash; fixture students never log in, so it doesn't need to verify.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$fixture$not-a-real-hash";

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Config::default()
    }
}

/// Build a test server on top of an `#[sqlx::test]` pool. Migrations have
/// already been applied by the test harness; `Application` re-running them
/// is a no-op.
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let app = Application::new_with_pool(create_test_config(), Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

/// Insert a trainer identity and return its user id.
pub async fn create_test_trainer(pool: &PgPool, full_name: &str) -> UserId {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (login, password_hash, role, full_name)
        VALUES ($1, $2, 'trainer', $3)
        RETURNING id
        "#,
    )
    .bind(format!("trainer_{}", rand::random::<u32>()))
    .bind(DUMMY_PASSWORD_HASH)
    .bind(full_name)
    .fetch_one(pool)
    .await
    .expect("Failed to create test trainer")
}

pub async fn create_test_group(pool: &PgPool, trainer_id: Option<UserId>, cost_per_session: i32) -> GroupDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Groups::new(&mut conn);

    repo.create(&GroupCreateDBRequest {
        name: format!("Group {}", rand::random::<u16>()),
        trainer_id,
        schedule: Some("Mon/Wed 18:00".to_string()),
        cost_per_session,
    })
    .await
    .expect("Failed to create test group")
}

pub async fn create_test_student(pool: &PgPool, group_id: Option<GroupId>) -> StudentDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Students::new(&mut conn);

    let suffix: u32 = rand::random();
    repo.create(&StudentCreateDBRequest {
        login: format!("sambokid_test_{suffix}"),
        password_hash: DUMMY_PASSWORD_HASH.to_string(),
        full_name: format!("Student {suffix}"),
        birth_date: None,
        parent_contact: Some("+7 900 000-00-00".to_string()),
        group_id,
    })
    .await
    .expect("Failed to create test student")
}

/// Current cached balance for a student.
pub async fn student_balance(pool: &PgPool, student_id: StudentId) -> i32 {
    sqlx::query_scalar("SELECT balance FROM students WHERE id = $1")
        .bind(student_id)
        .fetch_one(pool)
        .await
        .expect("Failed to fetch student balance")
}
