use sqlx::PgPool;
use uuid::Uuid;

use super::get::get_category;
use crate::{errors::AppError, models::category::Category};

pub async fn update_category(
    category_id: Uuid,
    name: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    postgres: PgPool,
) -> Result<Category, AppError> {
    get_category(category_id, &postgres).await?;

    if let Some(name) = &name {
        let duplicate = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM categories WHERE name = $1 AND id <> $2",
        )
        .bind(name)
        .bind(category_id)
        .fetch_optional(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to query category", e))?;

        if duplicate.is_some() {
            return Err(AppError::BadRequest(
                "Category with this name already exists".into(),
            ));
        }
    }

    let category = sqlx::query_as::<_, Category>(
        "UPDATE categories SET
            name = COALESCE($2, name),
            color = COALESCE($3, color),
            icon = COALESCE($4, icon)
        WHERE id = $1
        RETURNING id, name, color, icon, created_at",
    )
    .bind(category_id)
    .bind(&name)
    .bind(&color)
    .bind(&icon)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to update category", e))?;

    tracing::info!("Updated category {} ({})", category.name, category.id);

    Ok(category)
}
