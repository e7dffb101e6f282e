pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_user;
pub use get::{
    get_credentials_by_email, get_dashboard, get_password_hash, get_user_by_id, get_user_profile,
    list_users,
};
pub use patch::{update_password_hash, update_profile};
pub use post::create_user;
