use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        success: true,
        message: "Buildable API is running",
        timestamp: Utc::now(),
        environment: state.config.environment.clone(),
    })
}

pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Buildable API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth",
            "users": "/api/users",
            "projects": "/api/projects",
            "categories": "/api/categories",
            "ratings": "/api/ratings",
            "analytics": "/api/analytics",
        }
    }))
}
