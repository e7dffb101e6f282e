use sqlx::PgPool;

use crate::{errors::AppError, models::category::Category};

pub async fn create_category(
    name: String,
    color: String,
    icon: String,
    postgres: PgPool,
) -> Result<Category, AppError> {
    let existing = sqlx::query_scalar::<_, uuid::Uuid>("SELECT id FROM categories WHERE name = $1")
        .bind(&name)
        .fetch_optional(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to query category", e))?;

    if existing.is_some() {
        return Err(AppError::BadRequest(
            "Category with this name already exists".into(),
        ));
    }

    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, color, icon)
        VALUES ($1, $2, $3)
        RETURNING id, name, color, icon, created_at",
    )
    .bind(&name)
    .bind(&color)
    .bind(&icon)
    .fetch_one(&postgres)
    .await
    .map_err(|e| match AppError::from_db("Failed to create category", e) {
        AppError::BadRequest(_) => {
            AppError::BadRequest("Category with this name already exists".into())
        }
        other => other,
    })?;

    tracing::info!("Created new category: {} (ID: {})", category.name, category.id);

    Ok(category)
}
