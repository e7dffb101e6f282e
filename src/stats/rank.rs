use std::cmp::Ordering;

use super::aggregate::{RatingStats, TrendingStats, mean_of_rated_averages};

/// Projects need this many ratings before they can appear as "top rated".
pub const MIN_TOP_RATED_RATINGS: u64 = 3;

pub const POINTS_PER_PROJECT: f64 = 10.0;
pub const POINTS_PER_RATING: f64 = 5.0;
pub const POINTS_PER_AVERAGE_STAR: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeveloperStats {
    pub total_projects: u64,
    pub total_ratings: u64,
    /// Mean of the per-project averages of rated projects, unrounded.
    pub average_rating: f64,
}

impl DeveloperStats {
    pub fn from_projects(projects: &[RatingStats]) -> Self {
        Self {
            total_projects: projects.len() as u64,
            total_ratings: projects.iter().map(|p| p.total).sum(),
            average_rating: mean_of_rated_averages(projects),
        }
    }

    pub fn score(&self) -> f64 {
        leaderboard_score(self)
    }
}

/// `projects * 10 + ratings received * 5 + average across projects * 20`.
pub fn leaderboard_score(stats: &DeveloperStats) -> f64 {
    stats.total_projects as f64 * POINTS_PER_PROJECT
        + stats.total_ratings as f64 * POINTS_PER_RATING
        + stats.average_rating * POINTS_PER_AVERAGE_STAR
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Orders developers by leaderboard score, highest first.
///
/// Developers without any project are dropped. Equal scores keep their input
/// order.
pub fn rank_developers<T, F>(mut developers: Vec<T>, stats: F) -> Vec<T>
where
    F: Fn(&T) -> DeveloperStats,
{
    developers.retain(|d| stats(d).total_projects > 0);
    developers.sort_by(|a, b| desc(stats(a).score(), stats(b).score()));
    developers
}

/// Top-rated ordering: average descending, then rating count descending.
///
/// Projects with fewer than [`MIN_TOP_RATED_RATINGS`] ratings are excluded so a
/// single five-star vote cannot top the board.
pub fn rank_projects_by_rating_then_volume<T, F>(mut projects: Vec<T>, stats: F) -> Vec<T>
where
    F: Fn(&T) -> RatingStats,
{
    projects.retain(|p| stats(p).total >= MIN_TOP_RATED_RATINGS);
    projects.sort_by(|a, b| {
        let (a, b) = (stats(a), stats(b));
        desc(a.average, b.average).then_with(|| b.total.cmp(&a.total))
    });
    projects
}

/// Categories with the most projects first; ties keep input order.
pub fn rank_categories_by_usage<T, F>(mut categories: Vec<T>, project_count: F) -> Vec<T>
where
    F: Fn(&T) -> u64,
{
    categories.sort_by(|a, b| project_count(b).cmp(&project_count(a)));
    categories
}

/// Trending ordering: only qualifying projects, highest trending score first.
pub fn rank_trending<T, F>(mut projects: Vec<T>, recent: F) -> Vec<T>
where
    F: Fn(&T) -> TrendingStats,
{
    projects.retain(|p| recent(p).qualifies());
    projects.sort_by(|a, b| desc(recent(a).score(), recent(b).score()));
    projects
}

/// Pairs each item with its 1-based position.
pub fn with_ranks<T>(items: Vec<T>) -> impl Iterator<Item = (u64, T)> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (index as u64 + 1, item))
}
