use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::leaderboard::{Leaderboard, LeaderboardCandidate},
    stats::{DeveloperStats, Period, RatingStats, rank_developers, with_ranks},
};

/// One published project of a developer, with its rating aggregate.
#[derive(FromRow)]
struct AuthorProjectRow {
    author_id: Uuid,
    name: String,
    avatar: Option<String>,
    bio: Option<String>,
    rating_count: i64,
    rating_average: Option<f64>,
}

pub async fn get_leaderboard(
    period: Period,
    limit: usize,
    postgres: PgPool,
) -> Result<Leaderboard, AppError> {
    let now = Utc::now();
    let since: Option<DateTime<Utc>> = period.since(now);

    let (project_rows, given_rows) = futures::try_join!(
        sqlx::query_as::<_, AuthorProjectRow>(
            "SELECT u.id AS author_id, u.name, u.avatar, u.bio,
                COUNT(r.id) AS rating_count, AVG(r.rating)::float8 AS rating_average
            FROM projects p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN ratings r ON r.project_id = p.id
            WHERE p.published AND ($1::timestamptz IS NULL OR p.created_at >= $1)
            GROUP BY p.id, u.id
            ORDER BY u.id",
        )
        .bind(since)
        .fetch_all(&postgres),
        sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT user_id, COUNT(*) FROM ratings
            WHERE $1::timestamptz IS NULL OR created_at >= $1
            GROUP BY user_id",
        )
        .bind(since)
        .fetch_all(&postgres),
    )
    .map_err(|e| AppError::from_db("Failed to compute leaderboard", e))?;

    let ratings_given: HashMap<Uuid, i64> = given_rows.into_iter().collect();

    // (profile row, per-project stats) in first-seen order
    let mut order: Vec<Uuid> = Vec::new();
    let mut by_author: HashMap<Uuid, (AuthorProjectRow, Vec<RatingStats>)> = HashMap::new();
    for row in project_rows {
        let stats = RatingStats::new(row.rating_count.max(0) as u64, row.rating_average);
        match by_author.get_mut(&row.author_id) {
            Some((_, projects)) => projects.push(stats),
            None => {
                order.push(row.author_id);
                by_author.insert(row.author_id, (row, vec![stats]));
            }
        }
    }

    let candidates: Vec<LeaderboardCandidate> = order
        .into_iter()
        .filter_map(|id| by_author.remove(&id))
        .map(|(author, projects)| LeaderboardCandidate {
            ratings_given: ratings_given.get(&author.author_id).copied().unwrap_or(0),
            stats: DeveloperStats::from_projects(&projects),
            id: author.author_id,
            name: author.name,
            avatar: author.avatar,
            bio: author.bio,
        })
        .collect();

    let mut ranked = rank_developers(candidates, |c| c.stats);
    ranked.truncate(limit);

    let leaderboard: Vec<_> = with_ranks(ranked)
        .map(|(rank, candidate)| candidate.into_entry(rank))
        .collect();

    tracing::info!(
        "Computed {} leaderboard with {} entries",
        period.as_str(),
        leaderboard.len()
    );

    Ok(Leaderboard {
        leaderboard,
        period,
        generated_at: now,
    })
}
