pub mod analytics;
pub mod category;
pub mod leaderboard;
pub mod project;
pub mod rating;
pub mod user;
