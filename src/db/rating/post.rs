use sqlx::PgPool;
use uuid::Uuid;

use super::get::RATING_USER_SELECT;
use crate::{
    db::project::get_project,
    errors::AppError,
    models::rating::{RatingUserRow, RatingWithUser},
};

pub async fn create_rating(
    project_id: Uuid,
    user_id: Uuid,
    rating: i16,
    comment: Option<String>,
    postgres: PgPool,
) -> Result<RatingWithUser, AppError> {
    let project = get_project(project_id, postgres.clone()).await?;

    if project.author_id == user_id {
        return Err(AppError::BadRequest(
            "You cannot rate your own project".into(),
        ));
    }

    // One rating per (user, project) is enforced by the unique constraint.
    let sql = format!(
        "WITH inserted AS (
            INSERT INTO ratings (user_id, project_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        )
        {RATING_USER_SELECT}
        FROM inserted r
        JOIN users u ON u.id = r.user_id"
    );

    let row = sqlx::query_as::<_, RatingUserRow>(&sql)
        .bind(user_id)
        .bind(project_id)
        .bind(rating)
        .bind(&comment)
        .fetch_one(&postgres)
        .await
        .map_err(|e| match AppError::from_db("Failed to create rating", e) {
            AppError::BadRequest(_) => AppError::BadRequest(
                "You have already rated this project. Use PUT to update your rating.".into(),
            ),
            AppError::NotFound(_) => AppError::Unauthorized("User not found".into()),
            other => other,
        })?;

    tracing::info!(
        "User {} rated project {} with {} stars",
        user_id,
        project_id,
        rating
    );

    Ok(row.into())
}
