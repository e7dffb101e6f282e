use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// JSON body whose rejections use the `{success:false,error}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::IntoResponse,
    };
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Debug, Deserialize)]
    struct RatingBody {
        #[allow(dead_code)]
        rating: i16,
    }

    #[derive(Debug, Deserialize)]
    struct Paging {
        #[allow(dead_code)]
        page: Option<u32>,
    }

    async fn error_body(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn malformed_json_body_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/ratings/project/x")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"rating":"five"}"#))
            .unwrap();

        let err = ApiJson::<RatingBody>::from_request(request, &()).await.unwrap_err();
        let (status, body) = error_body(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|m| m.contains("rating")));
    }

    #[tokio::test]
    async fn missing_content_type_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .body(Body::from("{}"))
            .unwrap();

        let err = ApiJson::<RatingBody>::from_request(request, &()).await.unwrap_err();
        let (status, body) = error_body(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn invalid_query_uses_error_envelope() {
        let (mut parts, _) = Request::builder()
            .uri("/api/projects?page=first")
            .body(())
            .unwrap()
            .into_parts();

        let err = ApiQuery::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        let (status, body) = error_body(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn path_outside_a_route_is_a_server_error_envelope() {
        let (mut parts, _) = Request::builder()
            .uri("/api/projects/not-a-uuid")
            .body(())
            .unwrap()
            .into_parts();

        let err = ApiPath::<Uuid>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        let (status, body) = error_body(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }
}
