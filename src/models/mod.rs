pub mod analytics;
pub mod category;
pub mod leaderboard;
pub mod project;
pub mod rating;
pub mod response;
pub mod user;

pub use response::{ApiResponse, Page, PageQuery, Pagination};
pub use user::User;
