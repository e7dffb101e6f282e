use sqlx::PgPool;
use uuid::Uuid;

use super::get::get_rating;
use crate::errors::AppError;

pub async fn delete_rating(
    rating_id: Uuid,
    user_id: Uuid,
    postgres: PgPool,
) -> Result<(), AppError> {
    let existing = get_rating(rating_id, &postgres).await?;

    if existing.user_id != user_id {
        return Err(AppError::Forbidden(
            "Not authorized to delete this rating".into(),
        ));
    }

    sqlx::query("DELETE FROM ratings WHERE id = $1")
        .bind(rating_id)
        .execute(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to delete rating", e))?;

    tracing::info!("Deleted rating {} by {}", rating_id, user_id);

    Ok(())
}
