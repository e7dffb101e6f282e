use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

/// Removes the account; projects, their ratings and the user's own ratings cascade.
pub async fn delete_user(user_id: Uuid, postgres: PgPool) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to delete user", e))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    tracing::info!("Deleted user {}", user_id);

    Ok(())
}
