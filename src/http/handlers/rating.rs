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
    db::rating::{
        create_rating, delete_rating, get_project_ratings, get_user_ratings, update_rating,
    },
    errors::{ApiError, AppError},
    http::extract::{ApiJson, ApiPath, ApiQuery},
    http::validation::clean_optional,
    models::{
        ApiResponse, Page, PageQuery,
        rating::{MyRatingsPage, ProjectRatingsPage, RatingWithUser},
    },
    state::AppState,
};

const PROJECT_RATINGS_PAGE_SIZE: u32 = 10;
const MY_RATINGS_PAGE_SIZE: u32 = 10;

pub async fn get_project_ratings_handler(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ApiResponse<ProjectRatingsPage>>, ApiError> {
    let page = Page::from_query(query.page, query.limit, PROJECT_RATINGS_PAGE_SIZE);

    let ratings = get_project_ratings(project_id, page, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ratings for project {}: {}", project_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(ratings)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRatingPayload {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(max = 500, message = "Comment cannot exceed 500 characters"))]
    pub comment: Option<String>,
}

pub async fn create_rating_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CreateRatingPayload>,
) -> Result<(StatusCode, Json<ApiResponse<RatingWithUser>>), ApiError> {
    let user_id = claims.user_id()?;

    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    let rating = create_rating(
        project_id,
        user_id,
        payload.rating,
        clean_optional(payload.comment),
        state.postgres.clone(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to rate project {}: {}", project_id, e);
        e.to_response()
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            rating,
            "Rating submitted successfully",
        )),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRatingPayload {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i16>,
    #[validate(length(max = 500, message = "Comment cannot exceed 500 characters"))]
    pub comment: Option<String>,
}

pub async fn update_rating_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiPath(rating_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateRatingPayload>,
) -> Result<Json<ApiResponse<RatingWithUser>>, ApiError> {
    let user_id = claims.user_id()?;

    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    let rating = update_rating(
        rating_id,
        user_id,
        payload.rating,
        payload.comment.map(|c| c.trim().to_string()),
        state.postgres.clone(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to update rating {}: {}", rating_id, e);
        e.to_response()
    })?;

    Ok(Json(ApiResponse::with_message(
        rating,
        "Rating updated successfully",
    )))
}

pub async fn delete_rating_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiPath(rating_id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let user_id = claims.user_id()?;

    delete_rating(rating_id, user_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete rating {}: {}", rating_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::with_message(
        (),
        "Rating deleted successfully",
    )))
}

pub async fn my_ratings_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ApiResponse<MyRatingsPage>>, ApiError> {
    let user_id = claims.user_id()?;
    let page = Page::from_query(query.page, query.limit, MY_RATINGS_PAGE_SIZE);

    let ratings = get_user_ratings(user_id, page, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ratings of user {}: {}", user_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(ratings)))
}
