use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    models::project::{TopRatedProject, TrendingProject},
    stats::{Granularity, Period},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOverview {
    pub total_users: i64,
    pub total_projects: i64,
    pub total_ratings: i64,
    pub total_categories: i64,
    pub featured_projects: i64,
    pub recent_projects: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub overview: PlatformOverview,
    pub top_rated_projects: Vec<TopRatedProject>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<u32>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingReport {
    pub projects: Vec<TrendingProject>,
    pub period: Period,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBuckets {
    pub user_registrations: BTreeMap<String, u64>,
    pub project_creations: BTreeMap<String, u64>,
    pub ratings_given: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub total_user_registrations: u64,
    pub total_project_creations: u64,
    pub total_ratings_given: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub activity: ActivityBuckets,
    pub period: Period,
    pub group_by: Granularity,
    pub summary: ActivitySummary,
    pub generated_at: DateTime<Utc>,
}
