use axum::{extract::FromRequestParts, http::StatusCode, http::request::Parts};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    errors::{ApiError, AppError, error_response},
    models::{User, user::Claims},
    state::AppState,
};

const BCRYPT_COST: u32 = 12;

pub struct AuthClaims(pub Claims);

impl AuthClaims {
    pub fn from_token(token: &str, secret: &str) -> Result<Self, ApiError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| error_response(StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

        Ok(Self(token_data.claims))
    }

    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".into()).to_response())
    }
}

impl FromRequestParts<AppState> for AuthClaims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    error_response(
                        StatusCode::UNAUTHORIZED,
                        "Not authorized to access this route",
                    )
                })?;

        AuthClaims::from_token(bearer.token(), &state.config.jwt_secret)
    }
}

pub fn generate_jwt(user: &User, secret: &str, expiry_days: i64) -> Result<String, AppError> {
    let expiration = (Utc::now() + Duration::days(expiry_days)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(AppError::JwtError)
}

pub async fn hash_password(password: String) -> Result<String, AppError> {
    // bcrypt is CPU bound; keep it off the async workers.
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|_| AppError::InternalError)?
        .map_err(AppError::PasswordHash)
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|_| AppError::InternalError)?
        .map_err(AppError::PasswordHash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            bio: None,
            avatar: None,
            github: None,
            website: None,
            twitter: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_keeps_subject() {
        let user = sample_user();
        let token = generate_jwt(&user, "test-secret", 30).unwrap();
        let claims = AuthClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.0.email, "ada@example.com");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_jwt(&sample_user(), "test-secret", 30).unwrap();
        let (status, _) = AuthClaims::from_token(&token, "another-secret").err().unwrap();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = generate_jwt(&sample_user(), "test-secret", -2).unwrap();
        assert!(AuthClaims::from_token(&token, "test-secret").is_err());
    }
}
