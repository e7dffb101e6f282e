use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::project::{NewProject, Project},
};

pub async fn create_project(
    author_id: Uuid,
    new_project: NewProject,
    postgres: PgPool,
) -> Result<Project, AppError> {
    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::from_db("Failed to start transaction", e))?;

    let project = sqlx::query_as::<_, Project>(
        "INSERT INTO projects
            (title, description, category, status, tech_stack, images, github_url, demo_url, author_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, title, description, category, status, tech_stack, images, github_url,
            demo_url, author_id, featured, published, created_at, updated_at",
    )
    .bind(&new_project.title)
    .bind(&new_project.description)
    .bind(&new_project.category)
    .bind(&new_project.status)
    .bind(&new_project.tech_stack)
    .bind(&new_project.images)
    .bind(&new_project.github_url)
    .bind(&new_project.demo_url)
    .bind(author_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::from_db("Failed to create project", e))?;

    link_categories(&mut tx, project.id, &new_project.category_ids).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::from_db("Failed to commit project", e))?;

    tracing::info!("Created project {} ({}) for {}", project.title, project.id, author_id);

    Ok(project)
}

/// Replaces the category links of a project inside the caller's transaction.
pub(crate) async fn link_categories(
    tx: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    category_ids: &[Uuid],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM project_categories WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::from_db("Failed to clear project categories", e))?;

    if category_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO project_categories (project_id, category_id)
        SELECT $1, UNNEST($2::uuid[])
        ON CONFLICT DO NOTHING",
    )
    .bind(project_id)
    .bind(category_ids)
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::from_db("Category", e))?;

    Ok(())
}
