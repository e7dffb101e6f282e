use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::{
    http::handlers::{
        analytics::{
            activity_handler, category_stats_handler, platform_stats_handler, trending_handler,
        },
        auth::{
            delete_account_handler, login_handler, me_handler, register_handler,
            update_profile_handler, update_settings_handler,
        },
        category::{
            create_category_handler, delete_category_handler, get_category_handler,
            list_categories_handler, update_category_handler,
        },
        project::{
            create_project_handler, delete_project_handler, get_project_handler,
            list_projects_handler, update_project_handler,
        },
        rating::{
            create_rating_handler, delete_rating_handler, get_project_ratings_handler,
            my_ratings_handler, update_rating_handler,
        },
        service::{health_handler, index_handler},
        user::{
            get_dashboard_handler, get_leaderboard_handler, get_user_handler, list_users_handler,
        },
    },
    middleware::{IpRateLimiter, rate_limit_middleware},
    state::AppState,
};

fn auth_routes(limiter: IpRateLimiter) -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/me", get(me_handler))
        .route("/profile", put(update_profile_handler))
        .route("/settings", put(update_settings_handler))
        .route("/account", delete(delete_account_handler))
        .route_layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(limiter.clone(), req, next)
        }))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users_handler))
        .route("/leaderboard", get(get_leaderboard_handler))
        .route("/dashboard", get(get_dashboard_handler))
        .route("/{id}", get(get_user_handler))
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects_handler).post(create_project_handler))
        .route(
            "/{id}",
            get(get_project_handler)
                .put(update_project_handler)
                .delete(delete_project_handler),
        )
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/{id}",
            get(get_category_handler)
                .put(update_category_handler)
                .delete(delete_category_handler),
        )
}

fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/my-ratings", get(my_ratings_handler))
        .route(
            "/project/{project_id}",
            get(get_project_ratings_handler).post(create_rating_handler),
        )
        .route(
            "/{id}",
            put(update_rating_handler).delete(delete_rating_handler),
        )
}

fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(platform_stats_handler))
        .route("/categories", get(category_stats_handler))
        .route("/trending", get(trending_handler))
        .route("/activity", get(activity_handler))
}

pub fn create_http_routes(state: AppState, auth_limiter: IpRateLimiter) -> Router {
    let api = Router::new()
        .route("/", get(index_handler))
        .nest("/auth", auth_routes(auth_limiter))
        .nest("/users", user_routes())
        .nest("/projects", project_routes())
        .nest("/categories", category_routes())
        .nest("/ratings", rating_routes())
        .nest("/analytics", analytics_routes());

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
}
