use sqlx::PgPool;
use uuid::Uuid;

use super::get::get_category;
use crate::errors::AppError;

pub async fn delete_category(category_id: Uuid, postgres: PgPool) -> Result<(), AppError> {
    let category = get_category(category_id, &postgres).await?;

    if category.project_count > 0 {
        return Err(AppError::BadRequest(
            "Cannot delete category with associated projects".into(),
        ));
    }

    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(category_id)
        .execute(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to delete category", e))?;

    tracing::info!("Deleted category {}", category_id);

    Ok(())
}
