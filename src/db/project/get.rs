use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

use super::{PROJECT_COLUMNS, PROJECT_STATS_GROUP, PROJECT_STATS_SELECT};
use crate::{
    errors::AppError,
    models::{
        Page,
        category::CategorySummary,
        project::{Project, ProjectCard, ProjectDetail, ProjectListQuery, ProjectStatsRow},
    },
};

#[derive(FromRow)]
struct ProjectCategoryRow {
    project_id: Uuid,
    #[sqlx(flatten)]
    category: CategorySummary,
}

pub async fn get_project(project_id: Uuid, postgres: PgPool) -> Result<Project, AppError> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects p WHERE p.id = $1");

    sqlx::query_as::<_, Project>(&sql)
        .bind(project_id)
        .fetch_optional(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch project", e))?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
}

pub async fn get_project_stats_by_ids(
    project_ids: &[Uuid],
    postgres: PgPool,
) -> Result<Vec<ProjectStatsRow>, AppError> {
    if project_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!("{PROJECT_STATS_SELECT} WHERE p.id = ANY($1) {PROJECT_STATS_GROUP}");

    sqlx::query_as::<_, ProjectStatsRow>(&sql)
        .bind(project_ids)
        .fetch_all(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch project statistics", e))
}

pub async fn get_categories_for_projects(
    project_ids: &[Uuid],
    postgres: PgPool,
) -> Result<HashMap<Uuid, Vec<CategorySummary>>, AppError> {
    if project_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, ProjectCategoryRow>(
        "SELECT pc.project_id, c.id, c.name, c.color, c.icon
        FROM project_categories pc
        JOIN categories c ON c.id = pc.category_id
        WHERE pc.project_id = ANY($1)
        ORDER BY c.name",
    )
    .bind(project_ids)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch project categories", e))?;

    let mut by_project: HashMap<Uuid, Vec<CategorySummary>> = HashMap::new();
    for row in rows {
        by_project.entry(row.project_id).or_default().push(row.category);
    }

    Ok(by_project)
}

/// Attaches categories to each row, keeping the row order.
pub async fn with_categories(
    rows: Vec<ProjectStatsRow>,
    postgres: PgPool,
) -> Result<Vec<ProjectDetail>, AppError> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.project.id).collect();
    let mut categories = get_categories_for_projects(&ids, postgres).await?;

    Ok(rows
        .into_iter()
        .map(|row| ProjectDetail {
            categories: categories.remove(&row.project.id).unwrap_or_default(),
            card: row.into(),
        })
        .collect())
}

pub async fn get_project_detail(
    project_id: Uuid,
    postgres: PgPool,
) -> Result<ProjectDetail, AppError> {
    let row = get_project_stats_by_ids(&[project_id], postgres.clone())
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    with_categories(vec![row], postgres)
        .await?
        .pop()
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
}

fn push_project_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ProjectListQuery) {
    builder.push(" WHERE p.published");

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        builder.push(" AND p.category = ").push_bind(category.to_string());
    }

    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        builder.push(" AND p.status = ").push_bind(status.to_string());
    }

    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        builder
            .push(" AND (p.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub async fn list_projects(
    query: &ProjectListQuery,
    page: Page,
    postgres: PgPool,
) -> Result<(Vec<ProjectCard>, u64), AppError> {
    let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM projects p");
    push_project_filters(&mut count_query, query);

    let mut list_query = QueryBuilder::<Postgres>::new(PROJECT_STATS_SELECT);
    push_project_filters(&mut list_query, query);
    list_query
        .push(" ")
        .push(PROJECT_STATS_GROUP)
        .push(" ORDER BY ")
        .push(query.sort_by.order_clause(query.order))
        .push(" LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());

    let (total, rows) = futures::try_join!(
        count_query.build_query_scalar::<i64>().fetch_one(&postgres),
        list_query.build_query_as::<ProjectStatsRow>().fetch_all(&postgres),
    )
    .map_err(|e| AppError::from_db("Failed to list projects", e))?;

    let projects = rows.into_iter().map(ProjectCard::from).collect();

    Ok((projects, total.max(0) as u64))
}
