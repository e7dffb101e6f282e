use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::AuthClaims,
    db::project::{
        create_project, delete_project, get_project_detail, list_projects, update_project,
    },
    errors::{ApiError, AppError},
    http::extract::{ApiJson, ApiPath, ApiQuery},
    http::validation::{
        clean_images, clean_optional, validate_images, validate_optional_url,
        validate_project_category, validate_project_status, validate_tech_stack,
    },
    models::{
        ApiResponse, Page, Pagination,
        project::{NewProject, ProjectChanges, ProjectDetail, ProjectList, ProjectListQuery},
    },
    state::AppState,
};

const PROJECTS_PAGE_SIZE: u32 = 12;
const DEFAULT_STATUS: &str = "completed";

pub async fn list_projects_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectListQuery>,
) -> Result<Json<ApiResponse<ProjectList>>, ApiError> {
    let page = Page::from_query(query.page, query.limit, PROJECTS_PAGE_SIZE);

    let (projects, total) = list_projects(&query, page, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to list projects: {}", e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(ProjectList {
        projects,
        pagination: Pagination::new(page, total),
    })))
}

pub async fn get_project_handler(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<ProjectDetail>>, ApiError> {
    let project = get_project_detail(project_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get project {}: {}", project_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(project)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    #[validate(length(min = 3, max = 100, message = "Title must be between 3 and 100 characters"))]
    pub title: String,
    #[validate(length(
        min = 20,
        max = 2000,
        message = "Description must be between 20 and 2000 characters"
    ))]
    pub description: String,
    #[validate(custom(function = "validate_project_category"))]
    pub category: String,
    #[validate(custom(function = "validate_project_status"))]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_tech_stack"))]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_images"))]
    pub images: Vec<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

pub async fn create_project_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiJson(payload): ApiJson<CreateProjectPayload>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectDetail>>), ApiError> {
    let user_id = claims.user_id()?;

    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    let new_project = NewProject {
        title: payload.title.trim().to_string(),
        description: payload.description.trim().to_string(),
        category: payload.category,
        status: payload.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        tech_stack: payload.tech_stack,
        images: clean_images(payload.images),
        github_url: clean_optional(payload.github_url),
        demo_url: clean_optional(payload.demo_url),
        category_ids: payload.category_ids,
    };

    let project = create_project(user_id, new_project, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create project: {}", e);
            e.to_response()
        })?;

    let detail = get_project_detail(project.id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    tracing::info!("User {} created project {}", user_id, project.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            detail,
            "Project created successfully",
        )),
    ))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectPayload {
    #[validate(length(min = 3, max = 100, message = "Title must be between 3 and 100 characters"))]
    pub title: Option<String>,
    #[validate(length(
        min = 20,
        max = 2000,
        message = "Description must be between 20 and 2000 characters"
    ))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_project_category"))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_project_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "validate_tech_stack"))]
    pub tech_stack: Option<Vec<String>>,
    #[validate(custom(function = "validate_images"))]
    pub images: Option<Vec<String>>,
    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub demo_url: Option<String>,
    pub category_ids: Option<Vec<Uuid>>,
}

impl From<UpdateProjectPayload> for ProjectChanges {
    fn from(payload: UpdateProjectPayload) -> Self {
        Self {
            title: payload.title.map(|t| t.trim().to_string()),
            description: payload.description.map(|d| d.trim().to_string()),
            category: payload.category,
            status: payload.status,
            tech_stack: payload.tech_stack,
            images: payload.images.map(clean_images),
            // present but blank clears the link
            github_url: payload.github_url.map(|url| clean_optional(Some(url))),
            demo_url: payload.demo_url.map(|url| clean_optional(Some(url))),
            category_ids: payload.category_ids,
        }
    }
}

pub async fn update_project_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateProjectPayload>,
) -> Result<Json<ApiResponse<ProjectDetail>>, ApiError> {
    let user_id = claims.user_id()?;

    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    update_project(project_id, user_id, payload.into(), state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to update project {}: {}", project_id, e);
            e.to_response()
        })?;

    let detail = get_project_detail(project_id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(ApiResponse::with_message(
        detail,
        "Project updated successfully",
    )))
}

pub async fn delete_project_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let user_id = claims.user_id()?;

    delete_project(project_id, user_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete project {}: {}", project_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::with_message(
        (),
        "Project deleted successfully",
    )))
}
