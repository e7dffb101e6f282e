use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    models::{category::CategorySummary, response::Pagination, user::UserSummary},
    stats::{RatingStats, TrendingStats, round_one_decimal},
};

pub const PROJECT_CATEGORIES: &[&str] = &[
    "web-app",
    "mobile-app",
    "desktop-app",
    "library",
    "tool",
    "game",
    "ai-ml",
    "blockchain",
    "other",
];

pub const PROJECT_STATUSES: &[&str] = &["completed", "in-progress", "prototype"];

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub tech_stack: Vec<String>,
    pub images: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub author_id: Uuid,
    pub featured: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project joined with its author and a SQL rating aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectStatsRow {
    #[sqlx(flatten)]
    pub project: Project,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub rating_count: i64,
    pub rating_average: Option<f64>,
}

impl ProjectStatsRow {
    pub fn rating_stats(&self) -> RatingStats {
        RatingStats::new(self.rating_count.max(0) as u64, self.rating_average)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    #[serde(flatten)]
    pub project: Project,
    pub author: UserSummary,
    pub avg_rating: f64,
    pub total_ratings: u64,
}

impl From<ProjectStatsRow> for ProjectCard {
    fn from(row: ProjectStatsRow) -> Self {
        let stats = row.rating_stats();
        Self {
            author: UserSummary {
                id: row.project.author_id,
                name: row.author_name,
                avatar: row.author_avatar,
            },
            project: row.project,
            avg_rating: stats.display_average(),
            total_ratings: stats.total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub card: ProjectCard,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectList {
    pub projects: Vec<ProjectCard>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRatedProject {
    pub id: Uuid,
    pub title: String,
    pub avg_rating: f64,
    pub total_ratings: u64,
}

impl From<&ProjectStatsRow> for TopRatedProject {
    fn from(row: &ProjectStatsRow) -> Self {
        let stats = row.rating_stats();
        Self {
            id: row.project.id,
            title: row.project.title.clone(),
            avg_rating: stats.display_average(),
            total_ratings: stats.total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentStats {
    pub recent_ratings: u64,
    pub avg_recent_rating: f64,
}

impl From<TrendingStats> for RecentStats {
    fn from(stats: TrendingStats) -> Self {
        Self {
            recent_ratings: stats.recent_ratings,
            avg_recent_rating: round_one_decimal(stats.avg_recent_rating),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingProject {
    #[serde(flatten)]
    pub card: ProjectCard,
    pub categories: Vec<CategorySummary>,
    pub trending_score: f64,
    pub recent_stats: RecentStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ProjectSort {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "updatedAt")]
    UpdatedAt,
    #[serde(rename = "title")]
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl ProjectSort {
    pub fn order_clause(&self, order: SortOrder) -> &'static str {
        match (self, order) {
            (ProjectSort::CreatedAt, SortOrder::Asc) => "p.created_at ASC",
            (ProjectSort::CreatedAt, SortOrder::Desc) => "p.created_at DESC",
            (ProjectSort::UpdatedAt, SortOrder::Asc) => "p.updated_at ASC",
            (ProjectSort::UpdatedAt, SortOrder::Desc) => "p.updated_at DESC",
            (ProjectSort::Title, SortOrder::Asc) => "p.title ASC",
            (ProjectSort::Title, SortOrder::Desc) => "p.title DESC",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: ProjectSort,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub tech_stack: Vec<String>,
    pub images: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub category_ids: Vec<Uuid>,
}

/// Validated values ready to be written; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub github_url: Option<Option<String>>,
    pub demo_url: Option<Option<String>>,
    pub category_ids: Option<Vec<Uuid>>,
}
