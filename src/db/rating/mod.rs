pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_rating;
pub use get::{get_project_ratings, get_user_ratings};
pub use patch::update_rating;
pub use post::create_rating;
