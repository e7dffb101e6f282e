use sqlx::PgPool;
use uuid::Uuid;

use super::patch::ensure_project_owner;
use crate::errors::AppError;

// Ratings and category links go with the project (ON DELETE CASCADE).
pub async fn delete_project(
    project_id: Uuid,
    user_id: Uuid,
    postgres: PgPool,
) -> Result<(), AppError> {
    ensure_project_owner(project_id, user_id, "delete", &postgres).await?;

    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_id)
        .execute(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to delete project", e))?;

    tracing::info!("Deleted project {} for {}", project_id, user_id);

    Ok(())
}
