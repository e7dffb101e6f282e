use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{
    project::ProjectDetail,
    rating::RatingActivity,
    response::Pagination,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub password_hash: String,
}

/// Author or rater as embedded in other resources.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub project_count: i64,
    pub rating_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserSort {
    #[default]
    Newest,
    Oldest,
    Projects,
    Ratings,
}

impl UserSort {
    pub fn order_clause(&self) -> &'static str {
        match self {
            UserSort::Newest => "u.created_at DESC",
            UserSort::Oldest => "u.created_at ASC",
            UserSort::Projects => "project_count DESC, u.created_at DESC",
            UserSort::Ratings => "rating_count DESC, u.created_at DESC",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: UserSort,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileQuery {
    pub projects_page: Option<u32>,
    pub projects_limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_projects: i64,
    pub total_ratings_given: i64,
    pub total_ratings_received: u64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileWithStats {
    #[serde(flatten)]
    pub profile: PublicProfile,
    pub stats: ProfileStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: u64,
    pub published_projects: u64,
    pub featured_projects: u64,
    pub total_ratings_received: i64,
    pub total_ratings_given: i64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserList {
    pub users: Vec<PublicProfile>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user: ProfileWithStats,
    pub projects: Vec<ProjectDetail>,
    pub projects_pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub projects: Vec<ProjectDetail>,
    pub statistics: DashboardStats,
    pub recent_activity: Vec<RatingActivity>,
}

/// Full replacement of the editable profile; `None` clears a field.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub github: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // user ID
    pub email: String, // login email
    pub exp: usize,    // expiration time
}

#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}
