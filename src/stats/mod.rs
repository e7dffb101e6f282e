//! Rating aggregation and ranking.
//!
//! Everything in here is pure: callers fetch rows from the store, hand them in
//! as plain values and serialize whatever comes back. Nothing in this module
//! can fail; degenerate input (no ratings, too few ratings) yields zeros or
//! exclusion from ranked output.

pub mod aggregate;
pub mod bucket;
pub mod period;
pub mod rank;

pub use aggregate::{
    RatingStats, RatingSummary, StarBucket, TrendingStats, average_rating,
    mean_of_rated_averages, rating_distribution, round_one_decimal, trending_score,
};
pub use bucket::{Granularity, bucket_by_period, bucket_key};
pub use period::Period;
pub use rank::{
    DeveloperStats, leaderboard_score, rank_categories_by_usage, rank_developers,
    rank_projects_by_rating_then_volume, rank_trending, with_ranks,
};
