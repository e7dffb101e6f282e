use sqlx::PgPool;

use super::get::get_credentials_by_email;
use crate::{
    errors::AppError,
    models::{User, user::NewUser},
};

const DUPLICATE_EMAIL: &str = "User with this email already exists";

pub async fn create_user(new_user: NewUser, postgres: PgPool) -> Result<User, AppError> {
    let email = new_user.email.trim().to_lowercase();

    if get_credentials_by_email(&email, &postgres).await?.is_some() {
        return Err(AppError::BadRequest(DUPLICATE_EMAIL.into()));
    }

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash, github, website, twitter)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, email, bio, avatar, github, website, twitter, created_at",
    )
    .bind(new_user.name.trim())
    .bind(&email)
    .bind(&new_user.password_hash)
    .bind(&new_user.github)
    .bind(&new_user.website)
    .bind(&new_user.twitter)
    .fetch_one(&postgres)
    .await
    .map_err(|e| match AppError::from_db("Failed to create user", e) {
        // lost a race with a concurrent registration
        AppError::BadRequest(_) => AppError::BadRequest(DUPLICATE_EMAIL.into()),
        other => other,
    })?;

    tracing::info!("Registered user {} ({})", user.email, user.id);

    Ok(user)
}
