use axum::{
    Json,
    extract::State,
};

use crate::{
    db::analytics::{get_activity, get_category_stats, get_platform_stats, get_trending_projects},
    errors::ApiError,
    http::extract::ApiQuery,
    models::{
        ApiResponse, Page,
        analytics::{ActivityQuery, ActivityReport, PlatformStats, TrendingQuery, TrendingReport},
        category::CategoryStatsEntry,
    },
    state::AppState,
    stats::{
        Period,
        period::{ACTIVITY_PERIODS, TRENDING_PERIODS},
    },
};

const TRENDING_SIZE: u32 = 10;

pub async fn platform_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PlatformStats>>, ApiError> {
    let stats = get_platform_stats(state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute platform stats: {}", e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn category_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryStatsEntry>>>, ApiError> {
    let stats = get_category_stats(state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute category stats: {}", e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn trending_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TrendingQuery>,
) -> Result<Json<ApiResponse<TrendingReport>>, ApiError> {
    let period = Period::parse_or(query.period.as_deref(), TRENDING_PERIODS, Period::Week);
    let limit = Page::from_query(None, query.limit, TRENDING_SIZE).limit as usize;

    let report = get_trending_projects(period, limit, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute trending projects: {}", e);
            e.to_response()
        })?;

    tracing::info!(
        "Trending for {}: {} projects",
        period.as_str(),
        report.projects.len()
    );

    Ok(Json(ApiResponse::ok(report)))
}

pub async fn activity_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ActivityQuery>,
) -> Result<Json<ApiResponse<ActivityReport>>, ApiError> {
    let period = Period::parse_or(query.period.as_deref(), ACTIVITY_PERIODS, Period::Month);

    let report = get_activity(period, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute activity: {}", e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::ok(report)))
}
