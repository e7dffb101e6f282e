use sqlx::PgPool;
use uuid::Uuid;

use super::post::link_categories;
use crate::{
    errors::AppError,
    models::project::{Project, ProjectChanges},
};

pub(crate) async fn ensure_project_owner(
    project_id: Uuid,
    user_id: Uuid,
    action: &str,
    postgres: &PgPool,
) -> Result<(), AppError> {
    let author_id = sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_optional(postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch project", e))?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    if author_id != user_id {
        return Err(AppError::Forbidden(format!(
            "You can only {action} your own projects"
        )));
    }

    Ok(())
}

pub async fn update_project(
    project_id: Uuid,
    user_id: Uuid,
    changes: ProjectChanges,
    postgres: PgPool,
) -> Result<Project, AppError> {
    ensure_project_owner(project_id, user_id, "update", &postgres).await?;

    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::from_db("Failed to start transaction", e))?;

    let project = sqlx::query_as::<_, Project>(
        "UPDATE projects SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            category = COALESCE($4, category),
            status = COALESCE($5, status),
            tech_stack = COALESCE($6, tech_stack),
            images = COALESCE($7, images),
            github_url = CASE WHEN $8 THEN $9 ELSE github_url END,
            demo_url = CASE WHEN $10 THEN $11 ELSE demo_url END,
            updated_at = now()
        WHERE id = $1
        RETURNING id, title, description, category, status, tech_stack, images, github_url,
            demo_url, author_id, featured, published, created_at, updated_at",
    )
    .bind(project_id)
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(&changes.category)
    .bind(&changes.status)
    .bind(&changes.tech_stack)
    .bind(&changes.images)
    .bind(changes.github_url.is_some())
    .bind(changes.github_url.clone().flatten())
    .bind(changes.demo_url.is_some())
    .bind(changes.demo_url.clone().flatten())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::from_db("Failed to update project", e))?;

    if let Some(category_ids) = &changes.category_ids {
        link_categories(&mut tx, project_id, category_ids).await?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::from_db("Failed to commit project update", e))?;

    tracing::info!("Updated project {}", project_id);

    Ok(project)
}
