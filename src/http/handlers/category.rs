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
    db::category::{
        create_category, delete_category, get_all_categories, get_category_projects,
        update_category,
    },
    errors::{ApiError, AppError},
    http::extract::{ApiJson, ApiPath, ApiQuery},
    http::validation::validate_hex_color,
    models::{
        ApiResponse, Page, PageQuery, Pagination,
        category::{
            Category, CategoryProjects, CategoryWithCount, DEFAULT_CATEGORY_COLOR,
            DEFAULT_CATEGORY_ICON,
        },
    },
    state::AppState,
};

const CATEGORY_PROJECTS_PAGE_SIZE: u32 = 12;

pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryWithCount>>>, ApiError> {
    let categories = get_all_categories(state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {}", e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(categories)))
}

pub async fn get_category_handler(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ApiResponse<CategoryProjects>>, ApiError> {
    let page = Page::from_query(query.page, query.limit, CATEGORY_PROJECTS_PAGE_SIZE);

    let (category, projects) = get_category_projects(category_id, page, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category {}: {}", category_id, e);
            e.to_response()
        })?;

    let pagination = Pagination::new(page, category.project_count.max(0) as u64);

    Ok(Json(ApiResponse::ok(CategoryProjects {
        category,
        projects,
        pagination,
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryPayload {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    #[validate(length(max = 10, message = "Icon cannot exceed 10 characters"))]
    pub icon: Option<String>,
}

pub async fn create_category_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
    ApiJson(payload): ApiJson<CreateCategoryPayload>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    let category = create_category(
        payload.name.trim().to_string(),
        payload
            .color
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
        payload
            .icon
            .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
        state.postgres.clone(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create category: {}", e);
        e.to_response()
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            category,
            "Category created successfully",
        )),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryPayload {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    #[validate(length(max = 10, message = "Icon cannot exceed 10 characters"))]
    pub icon: Option<String>,
}

pub async fn update_category_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
    ApiPath(category_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateCategoryPayload>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    let category = update_category(
        category_id,
        payload.name.map(|n| n.trim().to_string()),
        payload.color,
        payload.icon,
        state.postgres.clone(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to update category {}: {}", category_id, e);
        e.to_response()
    })?;

    Ok(Json(ApiResponse::with_message(
        category,
        "Category updated successfully",
    )))
}

pub async fn delete_category_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
    ApiPath(category_id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    delete_category(category_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete category {}: {}", category_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::with_message(
        (),
        "Category deleted successfully",
    )))
}
