pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_project;
pub use get::{
    get_project, get_project_detail, get_project_stats_by_ids, list_projects, with_categories,
};
pub use patch::update_project;
pub use post::create_project;

pub(crate) const PROJECT_COLUMNS: &str = "p.id, p.title, p.description, p.category, p.status, \
    p.tech_stack, p.images, p.github_url, p.demo_url, p.author_id, p.featured, p.published, \
    p.created_at, p.updated_at";

/// Projects with author and rating aggregate; append `WHERE` and then
/// [`PROJECT_STATS_GROUP`].
pub(crate) const PROJECT_STATS_SELECT: &str = "SELECT p.id, p.title, p.description, p.category, \
    p.status, p.tech_stack, p.images, p.github_url, p.demo_url, p.author_id, p.featured, \
    p.published, p.created_at, p.updated_at, \
    u.name AS author_name, u.avatar AS author_avatar, \
    COUNT(r.id) AS rating_count, AVG(r.rating)::float8 AS rating_average \
    FROM projects p \
    JOIN users u ON u.id = p.author_id \
    LEFT JOIN ratings r ON r.project_id = p.id";

pub(crate) const PROJECT_STATS_GROUP: &str = "GROUP BY p.id, u.id";
