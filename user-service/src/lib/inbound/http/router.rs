use std::sync::Arc;
use std::time::Duration;

use auth::JwtVerifier;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_profile::get_profile;
use super::handlers::login::login;
use super::handlers::registration::registration;
use super::handlers::update_profile::update_profile;
use super::middleware::authenticate;
use crate::domain::user::ports::UserServicePort;

/// Shared handler state.
///
/// Generic over the service port so tests can run the router over any
/// repository.
pub struct AppState<US: UserServicePort> {
    pub user_service: Arc<US>,
}

impl<US: UserServicePort> Clone for AppState<US> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
        }
    }
}

pub fn create_router<US: UserServicePort>(
    user_service: Arc<US>,
    jwt_verifier: Arc<JwtVerifier>,
) -> Router {
    let state = AppState { user_service };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/auth/registration", post(registration::<US>))
        .route("/api/auth/login", post(login::<US>))
        .route(
            "/api/users",
            get(get_profile::<US>).put(update_profile::<US>),
        )
        .fallback(|| async { StatusCode::NOT_FOUND })
        // Applied to every route and the fallback; the gate itself decides
        // which paths are protected.
        .layer(middleware::from_fn_with_state(jwt_verifier, authenticate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
