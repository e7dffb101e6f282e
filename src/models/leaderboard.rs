use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stats::{DeveloperStats, Period, round_one_decimal};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_projects: u64,
    pub total_ratings: u64,
    pub ratings_given: i64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub stats: LeaderboardStats,
    pub score: f64,
    pub rank: u64,
}

/// Developer with the numbers the score is computed from, before ranking.
#[derive(Debug, Clone)]
pub struct LeaderboardCandidate {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub ratings_given: i64,
    pub stats: DeveloperStats,
}

impl LeaderboardCandidate {
    pub fn into_entry(self, rank: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            id: self.id,
            name: self.name,
            avatar: self.avatar,
            bio: self.bio,
            stats: LeaderboardStats {
                total_projects: self.stats.total_projects,
                total_ratings: self.stats.total_ratings,
                ratings_given: self.ratings_given,
                average_rating: round_one_decimal(self.stats.average_rating),
            },
            score: round_one_decimal(self.stats.score()),
            rank,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub period: Period,
    pub generated_at: DateTime<Utc>,
}
