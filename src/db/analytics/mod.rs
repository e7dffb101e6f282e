pub mod get;

pub use get::{get_activity, get_category_stats, get_platform_stats, get_trending_projects};
