use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use crate::{
    auth::{AuthClaims, generate_jwt, hash_password, verify_password},
    db::user::{
        create_user, delete_user, get_credentials_by_email, get_password_hash, get_user_by_id,
        update_password_hash, update_profile,
    },
    errors::{ApiError, AppError},
    http::extract::ApiJson,
    http::validation::{clean_optional, clean_social_profile, validate_optional_url},
    models::{
        ApiResponse, User,
        user::{AuthPayload, NewUser, ProfileChanges},
    },
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    pub github: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    pub twitter: Option<String>,
}

pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterPayload>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    let password_hash = hash_password(payload.password).await.map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        e.to_response()
    })?;

    let new_user = NewUser {
        name: payload.name,
        email: payload.email,
        password_hash,
        github: clean_social_profile(payload.github),
        website: clean_optional(payload.website),
        twitter: clean_social_profile(payload.twitter),
    };

    let user = create_user(new_user, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to register user: {}", e);
            e.to_response()
        })?;

    let token = issue_token(&user, &state)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            AuthPayload { user, token },
            "User registered successfully",
        )),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<Json<ApiResponse<AuthPayload>>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    let credentials = get_credentials_by_email(&payload.email, &state.postgres)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up credentials: {}", e);
            e.to_response()
        })?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.into()).to_response())?;

    let matches = verify_password(payload.password, credentials.password_hash)
        .await
        .map_err(|e| {
            tracing::error!("Failed to verify password: {}", e);
            e.to_response()
        })?;

    if !matches {
        tracing::warn!("Failed login for user {}", credentials.id);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()).to_response());
    }

    let user = get_user_by_id(credentials.id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    let token = issue_token(&user, &state)?;

    tracing::info!("User {} logged in", user.id);

    Ok(Json(ApiResponse::with_message(
        AuthPayload { user, token },
        "Login successful",
    )))
}

fn issue_token(user: &User, state: &AppState) -> Result<String, ApiError> {
    generate_jwt(user, &state.config.jwt_secret, state.config.jwt_expiry_days).map_err(|e| {
        tracing::error!("Failed to sign token: {}", e);
        e.to_response()
    })
}

pub async fn me_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user_id = claims.user_id()?;

    // a valid token for a deleted account is still unauthorized
    let user = get_user_by_id(user_id, state.postgres.clone())
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => {
                AppError::Unauthorized("User no longer exists".into()).to_response()
            }
            other => {
                tracing::error!("Failed to load current user: {}", other);
                other.to_response()
            }
        })?;

    Ok(Json(ApiResponse::ok(user)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Bio cannot exceed 500 characters"))]
    pub bio: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub avatar: Option<String>,
    pub github: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    pub twitter: Option<String>,
}

pub async fn update_profile_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiJson(payload): ApiJson<UpdateProfilePayload>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user_id = claims.user_id()?;

    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;

    let changes = ProfileChanges {
        name: payload.name,
        bio: clean_optional(payload.bio),
        avatar: clean_optional(payload.avatar),
        github: clean_social_profile(payload.github),
        website: clean_optional(payload.website),
        twitter: clean_social_profile(payload.twitter),
    };

    let user = update_profile(user_id, changes, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile for {}: {}", user_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::with_message(
        user,
        "Profile updated successfully",
    )))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    pub current_password: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: Option<String>,
    pub confirm_new_password: Option<String>,
}

impl UpdateSettingsPayload {
    /// A new password, or a confirmation sent on its own, must match its counterpart.
    fn check_confirmation(&self) -> Result<(), AppError> {
        if self.new_password.is_none() && self.confirm_new_password.is_none() {
            return Ok(());
        }
        if self.new_password != self.confirm_new_password {
            return Err(AppError::BadRequest("Passwords do not match".into()));
        }
        Ok(())
    }
}

pub async fn update_settings_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    ApiJson(payload): ApiJson<UpdateSettingsPayload>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let user_id = claims.user_id()?;

    payload
        .validate()
        .map_err(|e| AppError::from(e).to_response())?;
    payload
        .check_confirmation()
        .map_err(|e| e.to_response())?;

    if let (Some(current), Some(new_password)) = (payload.current_password, payload.new_password) {
        let stored = get_password_hash(user_id, &state.postgres)
            .await
            .map_err(|e| e.to_response())?;

        let matches = verify_password(current, stored).await.map_err(|e| {
            tracing::error!("Failed to verify password: {}", e);
            e.to_response()
        })?;

        if !matches {
            return Err(AppError::BadRequest("Current password is incorrect".into()).to_response());
        }

        let password_hash = hash_password(new_password).await.map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            e.to_response()
        })?;

        update_password_hash(user_id, password_hash, state.postgres.clone())
            .await
            .map_err(|e| {
                tracing::error!("Failed to change password for {}: {}", user_id, e);
                e.to_response()
            })?;
    }

    Ok(Json(ApiResponse::with_message(
        (),
        "Settings updated successfully",
    )))
}

pub async fn delete_account_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let user_id = claims.user_id()?;

    delete_user(user_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete account {}: {}", user_id, e);
            e.to_response()
        })?;

    Ok(Json(ApiResponse::with_message(
        (),
        "Account deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(new_password: Option<&str>, confirm: Option<&str>) -> UpdateSettingsPayload {
        UpdateSettingsPayload {
            current_password: Some("old-secret".into()),
            new_password: new_password.map(Into::into),
            confirm_new_password: confirm.map(Into::into),
        }
    }

    #[test]
    fn mismatched_password_confirmation_is_rejected() {
        let err = settings(Some("new-secret"), Some("other-secret"))
            .check_confirmation()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Passwords do not match"));

        assert!(settings(Some("new-secret"), None).check_confirmation().is_err());
        assert!(settings(None, Some("new-secret")).check_confirmation().is_err());
    }

    #[test]
    fn matching_or_absent_confirmation_passes() {
        assert!(settings(Some("new-secret"), Some("new-secret")).check_confirmation().is_ok());
        assert!(settings(None, None).check_confirmation().is_ok());
    }

    #[test]
    fn settings_payload_reads_camel_case() {
        let payload: UpdateSettingsPayload = serde_json::from_str(
            r#"{"currentPassword":"a","newPassword":"bbbbbb","confirmNewPassword":"cccccc"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.check_confirmation().is_err());
    }
}
