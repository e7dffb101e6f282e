use axum::{
    Json,
    extract::State,
};
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::{
        leaderboard::get_leaderboard,
        user::{get_dashboard, get_user_profile, list_users},
    },
    errors::ApiError,
    http::extract::{ApiPath, ApiQuery},
    models::{
        ApiResponse, Page,
        leaderboard::{Leaderboard, LeaderboardQuery},
        user::{Dashboard, UserList, UserListQuery, UserProfile, UserProfileQuery},
    },
    state::AppState,
    stats::{Period, period::LEADERBOARD_PERIODS},
};

const USERS_PAGE_SIZE: u32 = 12;
const PROFILE_PROJECTS_PAGE_SIZE: u32 = 6;
const LEADERBOARD_SIZE: u32 = 10;

pub async fn list_users_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> Result<Json<ApiResponse<UserList>>, ApiError> {
    let page = Page::from_query(query.page, query.limit, USERS_PAGE_SIZE);

    let users = list_users(&query, page, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {}", e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(users)))
}

pub async fn get_leaderboard_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LeaderboardQuery>,
) -> Result<Json<ApiResponse<Leaderboard>>, ApiError> {
    let period = Period::parse_or(query.period.as_deref(), LEADERBOARD_PERIODS, Period::All);
    let limit = Page::from_query(None, query.limit, LEADERBOARD_SIZE).limit as usize;

    let leaderboard = get_leaderboard(period, limit, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get leaderboard: {}", e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(leaderboard)))
}

pub async fn get_dashboard_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let user_id = claims.user_id()?;

    let dashboard = get_dashboard(user_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to build dashboard for {}: {}", user_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(dashboard)))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<UserProfileQuery>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let page = Page::from_query(
        query.projects_page,
        query.projects_limit,
        PROFILE_PROJECTS_PAGE_SIZE,
    );

    let profile = get_user_profile(user_id, page, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user {}: {}", user_id, e);
            e.to_response()
        })?;

    tracing::info!("Retrieved profile for user {}", user_id);

    Ok(Json(ApiResponse::ok(profile)))
}
