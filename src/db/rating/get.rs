use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::project::get_project,
    errors::AppError,
    models::{
        Page, Pagination,
        rating::{
            MyRatingsPage, ProjectRatingsPage, Rating, RatingProjectRow, RatingUserRow,
            RatingWithProject, RatingWithUser,
        },
    },
    stats::RatingSummary,
};

pub(crate) const RATING_USER_SELECT: &str = "SELECT r.id, r.user_id, r.project_id, r.rating, \
    r.comment, r.created_at, r.updated_at, u.name AS user_name, u.avatar AS user_avatar";

pub async fn get_rating(rating_id: Uuid, postgres: &PgPool) -> Result<Rating, AppError> {
    sqlx::query_as::<_, Rating>(
        "SELECT id, user_id, project_id, rating, comment, created_at, updated_at
        FROM ratings WHERE id = $1",
    )
    .bind(rating_id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch rating", e))?
    .ok_or_else(|| AppError::NotFound("Rating not found".into()))
}

pub async fn get_project_ratings(
    project_id: Uuid,
    page: Page,
    postgres: PgPool,
) -> Result<ProjectRatingsPage, AppError> {
    get_project(project_id, postgres.clone()).await?;

    let page_sql = format!(
        "{RATING_USER_SELECT}
        FROM ratings r
        JOIN users u ON u.id = r.user_id
        WHERE r.project_id = $1
        ORDER BY r.created_at DESC
        LIMIT $2 OFFSET $3"
    );

    let (rows, grouped) = futures::try_join!(
        sqlx::query_as::<_, RatingUserRow>(&page_sql)
            .bind(project_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&postgres),
        sqlx::query_as::<_, (i16, i64)>(
            "SELECT rating, COUNT(*) FROM ratings WHERE project_id = $1 GROUP BY rating",
        )
        .bind(project_id)
        .fetch_all(&postgres),
    )
    .map_err(|e| AppError::from_db("Failed to fetch project ratings", e))?;

    let grouped: Vec<(i16, u64)> = grouped
        .into_iter()
        .map(|(stars, count)| (stars, count.max(0) as u64))
        .collect();
    let statistics = RatingSummary::from_grouped(&grouped);

    Ok(ProjectRatingsPage {
        ratings: rows.into_iter().map(RatingWithUser::from).collect(),
        pagination: Pagination::new(page, statistics.total),
        statistics,
    })
}

pub async fn get_user_ratings(
    user_id: Uuid,
    page: Page,
    postgres: PgPool,
) -> Result<MyRatingsPage, AppError> {
    let (rows, total) = futures::try_join!(
        sqlx::query_as::<_, RatingProjectRow>(
            "SELECT r.id, r.user_id, r.project_id, r.rating, r.comment, r.created_at, r.updated_at,
                p.title AS project_title, p.images AS project_images,
                a.id AS author_id, a.name AS author_name, a.avatar AS author_avatar
            FROM ratings r
            JOIN projects p ON p.id = r.project_id
            JOIN users a ON a.id = p.author_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&postgres),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&postgres),
    )
    .map_err(|e| AppError::from_db("Failed to fetch user ratings", e))?;

    Ok(MyRatingsPage {
        ratings: rows.into_iter().map(RatingWithProject::from).collect(),
        pagination: Pagination::new(page, total.max(0) as u64),
    })
}
