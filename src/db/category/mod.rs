pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_category;
pub use get::{get_all_categories, get_category_projects};
pub use patch::update_category;
pub use post::create_category;
