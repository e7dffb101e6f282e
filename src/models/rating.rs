use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    models::{response::Pagination, user::UserSummary},
    stats::RatingSummary,
};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RatingUserRow {
    #[sqlx(flatten)]
    pub rating: Rating,
    pub user_name: String,
    pub user_avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingWithUser {
    #[serde(flatten)]
    pub rating: Rating,
    pub user: UserSummary,
}

impl From<RatingUserRow> for RatingWithUser {
    fn from(row: RatingUserRow) -> Self {
        Self {
            user: UserSummary {
                id: row.rating.user_id,
                name: row.user_name,
                avatar: row.user_avatar,
            },
            rating: row.rating,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RatingProjectRow {
    #[sqlx(flatten)]
    pub rating: Rating,
    pub project_title: String,
    pub project_images: Vec<String>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedProject {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub author: UserSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingWithProject {
    #[serde(flatten)]
    pub rating: Rating,
    pub project: RatedProject,
}

impl From<RatingProjectRow> for RatingWithProject {
    fn from(row: RatingProjectRow) -> Self {
        Self {
            project: RatedProject {
                id: row.rating.project_id,
                title: row.project_title,
                image: row.project_images.into_iter().next(),
                author: UserSummary {
                    id: row.author_id,
                    name: row.author_name,
                    avatar: row.author_avatar,
                },
            },
            rating: row.rating,
        }
    }
}

/// A rating given or received by a user, for their dashboard feed.
#[derive(Debug, Clone, FromRow)]
pub struct RatingActivityRow {
    #[sqlx(flatten)]
    pub rating: Rating,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub project_title: String,
    pub project_author_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityProject {
    pub id: Uuid,
    pub title: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingActivity {
    #[serde(flatten)]
    pub rating: Rating,
    pub user: UserSummary,
    pub project: ActivityProject,
}

impl From<RatingActivityRow> for RatingActivity {
    fn from(row: RatingActivityRow) -> Self {
        Self {
            user: UserSummary {
                id: row.rating.user_id,
                name: row.user_name,
                avatar: row.user_avatar,
            },
            project: ActivityProject {
                id: row.rating.project_id,
                title: row.project_title,
                user_id: row.project_author_id,
            },
            rating: row.rating,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRatingsPage {
    pub ratings: Vec<RatingWithUser>,
    pub statistics: RatingSummary,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyRatingsPage {
    pub ratings: Vec<RatingWithProject>,
    pub pagination: Pagination,
}
