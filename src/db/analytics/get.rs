use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db::project::{
        PROJECT_STATS_GROUP, PROJECT_STATS_SELECT, get_project_stats_by_ids, with_categories,
    },
    errors::AppError,
    models::{
        analytics::{
            ActivityBuckets, ActivityReport, ActivitySummary, PlatformOverview, PlatformStats,
            TrendingReport,
        },
        category::{CategoryStatsEntry, CategorySummary, CategoryUsageStats},
        project::{ProjectStatsRow, TopRatedProject, TrendingProject},
    },
    stats::{
        Period, RatingStats, TrendingStats, bucket_by_period, mean_of_rated_averages,
        rank::MIN_TOP_RATED_RATINGS, rank_categories_by_usage, rank_projects_by_rating_then_volume,
        rank_trending, round_one_decimal,
    },
};

const TOP_RATED_LIMIT: usize = 3;
const RECENT_PROJECT_DAYS: i64 = 30;

pub async fn get_platform_stats(postgres: PgPool) -> Result<PlatformStats, AppError> {
    let now = Utc::now();
    let recent_since = now - Duration::days(RECENT_PROJECT_DAYS);

    let top_sql = format!(
        "{PROJECT_STATS_SELECT} WHERE p.published {PROJECT_STATS_GROUP} HAVING COUNT(r.id) >= $1"
    );

    let (
        total_users,
        total_projects,
        total_ratings,
        total_categories,
        featured_projects,
        recent_projects,
        candidates,
    ) = futures::try_join!(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users").fetch_one(&postgres),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE published")
            .fetch_one(&postgres),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings").fetch_one(&postgres),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories").fetch_one(&postgres),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE published AND featured",
        )
        .fetch_one(&postgres),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE published AND created_at >= $1",
        )
        .bind(recent_since)
        .fetch_one(&postgres),
        sqlx::query_as::<_, ProjectStatsRow>(&top_sql)
            .bind(MIN_TOP_RATED_RATINGS as i64)
            .fetch_all(&postgres),
    )
    .map_err(|e| AppError::from_db("Failed to compute platform statistics", e))?;

    // HAVING already applies the threshold; the ranker re-checks it on its own.
    let top_rated_projects =
        rank_projects_by_rating_then_volume(candidates, ProjectStatsRow::rating_stats)
            .iter()
            .take(TOP_RATED_LIMIT)
            .map(TopRatedProject::from)
            .collect();

    Ok(PlatformStats {
        overview: PlatformOverview {
            total_users,
            total_projects,
            total_ratings,
            total_categories,
            featured_projects,
            recent_projects,
        },
        top_rated_projects,
        generated_at: now,
    })
}

#[derive(FromRow)]
struct CategoryProjectRow {
    category_id: Uuid,
    rating_count: i64,
    rating_average: Option<f64>,
}

pub async fn get_category_stats(postgres: PgPool) -> Result<Vec<CategoryStatsEntry>, AppError> {
    let (categories, project_rows) = futures::try_join!(
        sqlx::query_as::<_, CategorySummary>(
            "SELECT id, name, color, icon FROM categories ORDER BY name",
        )
        .fetch_all(&postgres),
        sqlx::query_as::<_, CategoryProjectRow>(
            "SELECT pc.category_id, COUNT(r.id) AS rating_count,
                AVG(r.rating)::float8 AS rating_average
            FROM project_categories pc
            JOIN projects p ON p.id = pc.project_id AND p.published
            LEFT JOIN ratings r ON r.project_id = p.id
            GROUP BY pc.category_id, p.id",
        )
        .fetch_all(&postgres),
    )
    .map_err(|e| AppError::from_db("Failed to compute category statistics", e))?;

    let mut per_category: HashMap<Uuid, Vec<RatingStats>> = HashMap::new();
    for row in project_rows {
        per_category
            .entry(row.category_id)
            .or_default()
            .push(RatingStats::new(row.rating_count.max(0) as u64, row.rating_average));
    }

    let entries: Vec<CategoryStatsEntry> = categories
        .into_iter()
        .map(|category| {
            let projects = per_category.remove(&category.id).unwrap_or_default();
            CategoryStatsEntry {
                stats: CategoryUsageStats {
                    total_projects: projects.len() as u64,
                    total_ratings: projects.iter().map(|p| p.total).sum(),
                    average_rating: round_one_decimal(mean_of_rated_averages(&projects)),
                },
                id: category.id,
                name: category.name,
                color: category.color,
                icon: category.icon,
            }
        })
        .collect();

    Ok(rank_categories_by_usage(entries, |entry| entry.stats.total_projects))
}

/// Groups newest-first rating rows per project, keeping the order in which
/// each project was first seen.
fn group_recent_ratings(recent: Vec<(Uuid, i16)>) -> Vec<(Uuid, TrendingStats)> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut by_project: HashMap<Uuid, Vec<i16>> = HashMap::new();
    for (project_id, rating) in recent {
        by_project
            .entry(project_id)
            .or_insert_with(|| {
                order.push(project_id);
                Vec::new()
            })
            .push(rating);
    }

    order
        .into_iter()
        .map(|id| {
            let ratings = by_project.remove(&id).unwrap_or_default();
            (id, TrendingStats::from_ratings(ratings))
        })
        .collect()
}

pub async fn get_trending_projects(
    period: Period,
    limit: usize,
    postgres: PgPool,
) -> Result<TrendingReport, AppError> {
    let now = Utc::now();
    let since = period.since(now).unwrap_or(now - Duration::days(7));

    let recent = sqlx::query_as::<_, (Uuid, i16)>(
        "SELECT r.project_id, r.rating
        FROM ratings r
        JOIN projects p ON p.id = r.project_id
        WHERE p.published AND r.created_at >= $1
        ORDER BY r.created_at DESC, r.id",
    )
    .bind(since)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch recent ratings", e))?;

    let scored = group_recent_ratings(recent);

    let mut ranked = rank_trending(scored, |(_, stats)| *stats);
    ranked.truncate(limit);

    let ids: Vec<Uuid> = ranked.iter().map(|(id, _)| *id).collect();
    let mut rows: HashMap<Uuid, ProjectStatsRow> = get_project_stats_by_ids(&ids, postgres.clone())
        .await?
        .into_iter()
        .map(|row| (row.project.id, row))
        .collect();

    // stats rows come back unordered; restore ranking order
    let ordered: Vec<ProjectStatsRow> = ids.iter().filter_map(|id| rows.remove(id)).collect();
    let mut recent_stats: HashMap<Uuid, TrendingStats> = ranked.into_iter().collect();

    let projects = with_categories(ordered, postgres)
        .await?
        .into_iter()
        .map(|detail| {
            let stats = recent_stats
                .remove(&detail.card.project.id)
                .unwrap_or_default();
            TrendingProject {
                trending_score: stats.score(),
                recent_stats: stats.into(),
                card: detail.card,
                categories: detail.categories,
            }
        })
        .collect();

    Ok(TrendingReport {
        projects,
        period,
        generated_at: now,
    })
}

async fn created_since(
    table: &str,
    since: DateTime<Utc>,
    postgres: &PgPool,
) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
    let sql = format!("SELECT created_at FROM {table} WHERE created_at >= $1");

    sqlx::query_scalar::<_, DateTime<Utc>>(&sql)
        .bind(since)
        .fetch_all(postgres)
        .await
}

pub async fn get_activity(period: Period, postgres: PgPool) -> Result<ActivityReport, AppError> {
    let now = Utc::now();
    let since = period.since(now).unwrap_or(now - Duration::days(30));
    let group_by = period.activity_granularity();

    let (users, projects, ratings) = futures::try_join!(
        created_since("users", since, &postgres),
        created_since("projects", since, &postgres),
        created_since("ratings", since, &postgres),
    )
    .map_err(|e| AppError::from_db("Failed to fetch activity", e))?;

    let summary = ActivitySummary {
        total_user_registrations: users.len() as u64,
        total_project_creations: projects.len() as u64,
        total_ratings_given: ratings.len() as u64,
    };

    Ok(ActivityReport {
        activity: ActivityBuckets {
            user_registrations: bucket_by_period(users, group_by),
            project_creations: bucket_by_period(projects, group_by),
            ratings_given: bucket_by_period(ratings, group_by),
        },
        period,
        group_by,
        summary,
        generated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trending_ties_favor_the_most_recently_rated_project() {
        let older = Uuid::from_u128(1);
        let newer = Uuid::from_u128(2);

        // newest first, as the recent-ratings query returns them
        let rows = vec![(newer, 4), (older, 5), (newer, 5), (older, 4), (older, 2)];
        let grouped = group_recent_ratings(rows);

        assert_eq!(grouped[0].0, newer);
        assert_eq!(grouped[0].1.recent_ratings, 2);
        assert_eq!(grouped[1].0, older);
        assert_eq!(grouped[1].1.recent_ratings, 3);

        let tied = group_recent_ratings(vec![(newer, 4), (older, 4), (older, 4), (newer, 4)]);
        let ranked = rank_trending(tied, |(_, stats)| *stats);
        assert_eq!(ranked[0].0, newer);
        assert_eq!(ranked[1].0, older);
    }

    #[test]
    fn single_recent_rating_does_not_trend() {
        let only = Uuid::from_u128(7);
        let ranked = rank_trending(group_recent_ratings(vec![(only, 5)]), |(_, s)| *s);
        assert!(ranked.is_empty());
    }
}
