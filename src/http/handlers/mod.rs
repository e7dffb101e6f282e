pub mod analytics;
pub mod auth;
pub mod category;
pub mod project;
pub mod rating;
pub mod service;
pub mod user;
