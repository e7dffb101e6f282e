use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::project::{PROJECT_STATS_GROUP, PROJECT_STATS_SELECT},
    errors::AppError,
    models::{
        Page,
        category::CategoryWithCount,
        project::{ProjectCard, ProjectStatsRow},
    },
};

const CATEGORY_WITH_COUNT_SELECT: &str = "SELECT c.id, c.name, c.color, c.icon, c.created_at, \
    (SELECT COUNT(*) FROM project_categories pc WHERE pc.category_id = c.id) AS project_count \
    FROM categories c";

pub async fn get_all_categories(postgres: PgPool) -> Result<Vec<CategoryWithCount>, AppError> {
    let sql = format!("{CATEGORY_WITH_COUNT_SELECT} ORDER BY c.name ASC");

    sqlx::query_as::<_, CategoryWithCount>(&sql)
        .fetch_all(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch categories", e))
}

pub async fn get_category(
    category_id: Uuid,
    postgres: &PgPool,
) -> Result<CategoryWithCount, AppError> {
    let sql = format!("{CATEGORY_WITH_COUNT_SELECT} WHERE c.id = $1");

    sqlx::query_as::<_, CategoryWithCount>(&sql)
        .bind(category_id)
        .fetch_optional(postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch category", e))?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
}

pub async fn get_category_projects(
    category_id: Uuid,
    page: Page,
    postgres: PgPool,
) -> Result<(CategoryWithCount, Vec<ProjectCard>), AppError> {
    let category = get_category(category_id, &postgres).await?;

    let sql = format!(
        "{PROJECT_STATS_SELECT}
        JOIN project_categories pc ON pc.project_id = p.id
        WHERE pc.category_id = $1 AND p.published
        {PROJECT_STATS_GROUP}
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3"
    );

    let rows = sqlx::query_as::<_, ProjectStatsRow>(&sql)
        .bind(category_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch category projects", e))?;

    Ok((category, rows.into_iter().map(ProjectCard::from).collect()))
}
