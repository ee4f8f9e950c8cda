use std::sync::Arc;

use auth::JwtError;
use auth::JwtVerifier;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;

/// Every path starting with this prefix requires a bearer token.
pub const PROTECTED_PREFIX: &str = "/api/users";

/// Identity resolved from a verified token, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("Authorization header is not valid UTF-8")]
    InvalidEncoding,

    #[error("Authorization header is not of the form 'Bearer <token>'")]
    InvalidScheme,

    #[error(transparent)]
    Token(#[from] JwtError),
}

/// Bearer gate: verifies the token on protected paths and stores the identity.
///
/// Every rejection produces the same 403 body; the cause is only logged.
pub async fn authenticate(
    State(verifier): State<Arc<JwtVerifier>>,
    mut req: Request,
    next: Next,
) -> Response {
    if !req.uri().path().starts_with(PROTECTED_PREFIX) {
        return next.run(req).await;
    }

    match authorize(&verifier, req.headers()) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(
                path = %req.uri().path(),
                reason = %e,
                "Access denied"
            );
            ApiError::access_denied().into_response()
        }
    }
}

fn authorize(
    verifier: &JwtVerifier,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, GateError> {
    let token = extract_bearer_token(headers)?;
    let claims = verifier.verify(token)?;

    Ok(AuthenticatedUser {
        user_id: UserId(claims.user_id),
    })
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The value must split on spaces into exactly two parts, `Bearer` and a
/// non-empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, GateError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(GateError::MissingHeader)?
        .to_str()
        .map_err(|_| GateError::InvalidEncoding)?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(GateError::InvalidScheme),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| ApiError::Forbidden("user not logged in".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use chrono::Duration;
    use chrono::Utc;
    use tower::ServiceExt;

    use super::*;

    const PRIVATE_PEM: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../auth/fixtures/keys/private.pem"
    ));
    const PUBLIC_PEM: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../auth/fixtures/keys/public.pem"
    ));

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn signer() -> auth::JwtSigner {
        auth::JwtSigner::from_pem(PRIVATE_PEM, Duration::hours(24)).unwrap()
    }

    fn app() -> Router {
        let verifier = Arc::new(JwtVerifier::from_pem(PUBLIC_PEM).unwrap());

        Router::new()
            .route(
                "/api/users",
                get(|user: AuthenticatedUser| async move { user.user_id.to_string() }),
            )
            .route("/api/auth/login", get(|| async { "public" }))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(axum::middleware::from_fn_with_state(verifier, authenticate))
    }

    async fn send(path: &str, authorization: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut request = axum::http::Request::builder().uri(path);
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }

        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, body.to_vec())
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn test_extract_bearer_token_rejects_malformed_headers() {
        assert!(matches!(
            extract_bearer_token(&HeaderMap::new()),
            Err(GateError::MissingHeader)
        ));

        for value in ["Token abc", "Bearer", "Bearer ", "Bearer a b", "bearer abc"] {
            assert!(
                matches!(
                    extract_bearer_token(&headers_with(value)),
                    Err(GateError::InvalidScheme)
                ),
                "accepted {:?}",
                value
            );
        }
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let token = signer().sign(42).unwrap();

        let (status, body) = send("/api/users", Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"42");
    }

    #[tokio::test]
    async fn test_every_rejection_has_the_same_body() {
        let expired = signer()
            .encode(&auth::Claims::issued_at(
                42,
                Utc::now() - Duration::hours(25),
                Duration::hours(24),
            ))
            .unwrap();
        let expired_header = format!("Bearer {}", expired);

        let cases = [
            None,
            Some("Token abc"),
            Some("Bearer"),
            Some("Bearer a b"),
            Some("Bearer not-a-token"),
            Some(expired_header.as_str()),
        ];

        let expected = serde_json::json!({
            "status_code": 403,
            "data": {"message": "access denied"}
        });
        for authorization in cases {
            let (status, body) = send("/api/users", authorization).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{:?}", authorization);

            let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn test_prefix_match_gates_unknown_paths() {
        let (status, _) = send("/api/usersX", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send("/api/users/profile", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_public_paths_bypass_gate() {
        let (status, body) = send("/api/auth/login", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"public");
    }

    #[tokio::test]
    async fn test_extractor_without_gate_is_forbidden() {
        let app = Router::new().route(
            "/me",
            get(|user: AuthenticatedUser| async move { user.user_id.to_string() }),
        );

        let request = axum::http::Request::builder()
            .uri("/me")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
