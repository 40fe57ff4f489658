//! HTTP handlers for training group endpoints.

use crate::{
    AppState,
    api::models::groups::{GroupCreate, GroupCreatedResponse, GroupListResponse, GroupResponse},
    db::{
        handlers::{Groups, Repository, groups::GroupFilter},
        models::groups::GroupCreateDBRequest,
    },
    errors::{Error, Result},
};
use axum::{extract::State, http::StatusCode, response::Json};

/// List active groups
#[utoipa::path(
    get,
    path = "/groups",
    tag = "groups",
    summary = "List active groups",
    description = "Non-archived groups with trainer name and roster size, newest first",
    responses(
        (status = 200, description = "List of groups", body = GroupListResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_groups(State(state): State<AppState>) -> Result<Json<GroupListResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Groups::new(&mut conn);

    let groups = repo.list(&GroupFilter::active()).await?;

    Ok(Json(GroupListResponse {
        groups: groups.into_iter().map(GroupResponse::from).collect(),
    }))
}

/// Create a new group
#[utoipa::path(
    post,
    path = "/groups",
    tag = "groups",
    summary = "Create a group",
    request_body = GroupCreate,
    responses(
        (status = 201, description = "Group created", body = GroupCreatedResponse),
        (status = 400, description = "Bad request - group name is missing"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_group(
    State(state): State<AppState>,
    Json(data): Json<GroupCreate>,
) -> Result<(StatusCode, Json<GroupCreatedResponse>)> {
    let name = data.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(Error::BadRequest {
            message: "Group name is required".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Groups::new(&mut conn);

    let db_request = GroupCreateDBRequest {
        name: name.to_string(),
        trainer_id: data.trainer_id,
        schedule: data.schedule.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string),
        cost_per_session: data.cost_per_session,
    };

    let group = repo.create(&db_request).await?;

    Ok((
        StatusCode::CREATED,
        Json(GroupCreatedResponse {
            success: true,
            group: GroupResponse::from(group),
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
    async fn test_create_group_with_defaults(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let trainer_id = create_test_trainer(&pool, "Coach Orlov").await;

        let response = app
            .post("/api/v1/groups")
            .json(&json!({
                "name": "Juniors",
                "trainer_id": trainer_id,
                "schedule": "Mon/Wed 18:00"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: GroupCreatedResponse = response.json();
        assert!(body.success);
        assert_eq!(body.group.name, "Juniors");
        assert_eq!(body.group.cost_per_session, 300); // default when omitted
        assert_eq!(body.group.trainer_id, Some(trainer_id));
        assert_eq!(body.group.trainer_name.as_deref(), Some("Coach Orlov"));
        assert_eq!(body.group.student_count, 0);
        assert!(!body.group.is_archived);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_group_requires_name(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.post("/api/v1/groups").json(&json!({ "schedule": "Tue 19:00" })).await;
        response.assert_status_bad_request();

        // Whitespace-only names are rejected too
        let response = app.post("/api/v1/groups").json(&json!({ "name": "   " })).await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_groups_skips_archived(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let trainer_id = create_test_trainer(&pool, "Coach Orlov").await;
        let active = create_test_group(&pool, Some(trainer_id), 300).await;
        let archived = create_test_group(&pool, Some(trainer_id), 500).await;

        sqlx::query("UPDATE groups SET is_archived = TRUE WHERE id = $1")
            .bind(archived.id)
            .execute(&pool)
            .await
            .expect("Failed to archive group");

        // Two students on the active roster
        create_test_student(&pool, Some(active.id)).await;
        create_test_student(&pool, Some(active.id)).await;

        let response = app.get("/api/v1/groups").await;
        response.assert_status_ok();
        let body: GroupListResponse = response.json();

        assert_eq!(body.groups.len(), 1);
        assert_eq!(body.groups[0].id, active.id);
        assert_eq!(body.groups[0].student_count, 2);
        assert_eq!(body.groups[0].trainer_name.as_deref(), Some("Coach Orlov"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unsupported_method_returns_405(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.delete("/api/v1/groups").await;
        response.assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
