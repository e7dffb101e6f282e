use sqlx::PgPool;
use uuid::Uuid;

use super::get::{RATING_USER_SELECT, get_rating};
use crate::{
    errors::AppError,
    models::rating::{RatingUserRow, RatingWithUser},
};

pub async fn update_rating(
    rating_id: Uuid,
    user_id: Uuid,
    rating: Option<i16>,
    comment: Option<String>,
    postgres: PgPool,
) -> Result<RatingWithUser, AppError> {
    let existing = get_rating(rating_id, &postgres).await?;

    if existing.user_id != user_id {
        return Err(AppError::Forbidden(
            "Not authorized to update this rating".into(),
        ));
    }

    let sql = format!(
        "WITH updated AS (
            UPDATE ratings SET
                rating = COALESCE($2, rating),
                comment = COALESCE($3, comment),
                updated_at = now()
            WHERE id = $1
            RETURNING *
        )
        {RATING_USER_SELECT}
        FROM updated r
        JOIN users u ON u.id = r.user_id"
    );

    let row = sqlx::query_as::<_, RatingUserRow>(&sql)
        .bind(rating_id)
        .bind(rating)
        .bind(&comment)
        .fetch_one(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to update rating", e))?;

    tracing::info!("Updated rating {} by {}", rating_id, user_id);

    Ok(row.into())
}
