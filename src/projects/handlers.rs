use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AdminUser,
    error::ApiError,
    projects::{
        dto::{ProjectListResponse, ProjectRequest, ProjectResponse},
        repo,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/:id", get(get_project))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects/:id", patch(update_project).delete(delete_project))
}

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let projects = repo::list(&state.db).await?;
    Ok(Json(ProjectListResponse {
        success: true,
        projects,
    }))
}

#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let Some(project) = repo::get(&state.db, id).await? else {
        return Err(ApiError::NotFound("Project not found"));
    };
    Ok(Json(ProjectResponse {
        success: true,
        message: None,
        project,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    AdminUser(caller): AdminUser,
    Json(payload): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let fields = payload.validate()?;
    let project = repo::create(&state.db, &fields).await?;
    info!(project_id = %project.id, admin = %caller.id, "project created");
    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            success: true,
            message: Some("Project created successfully".into()),
            project,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_project(
    State(state): State<AppState>,
    AdminUser(caller): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let fields = payload.validate()?;
    let Some(project) = repo::update(&state.db, id, &fields).await? else {
        return Err(ApiError::NotFound("Project not found"));
    };
    info!(project_id = %project.id, admin = %caller.id, "project updated");
    Ok(Json(ProjectResponse {
        success: true,
        message: None,
        project,
    }))
}

/// Returns a confirmation, not the deleted record.
#[instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    AdminUser(caller): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Project not found"));
    }
    info!(project_id = %id, admin = %caller.id, "project deleted");
    Ok(Json(json!({ "success": true, "message": "Project deleted" })))
}
