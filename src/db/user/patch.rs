use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{User, user::ProfileChanges},
};

pub async fn update_profile(
    user_id: Uuid,
    changes: ProfileChanges,
    postgres: PgPool,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET
            name = $2,
            bio = $3,
            avatar = $4,
            github = $5,
            website = $6,
            twitter = $7,
            updated_at = now()
        WHERE id = $1
        RETURNING id, name, email, bio, avatar, github, website, twitter, created_at",
    )
    .bind(user_id)
    .bind(changes.name.trim())
    .bind(&changes.bio)
    .bind(&changes.avatar)
    .bind(&changes.github)
    .bind(&changes.website)
    .bind(&changes.twitter)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to update profile", e))?
    .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    tracing::info!("Updated profile for user {}", user.id);

    Ok(user)
}

pub async fn update_password_hash(
    user_id: Uuid,
    password_hash: String,
    postgres: PgPool,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1",
    )
    .bind(user_id)
    .bind(&password_hash)
    .execute(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to update password", e))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    tracing::info!("Changed password for user {}", user_id);

    Ok(())
}
