use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::session::logout;
use super::handlers::session::protected;
use super::handlers::session::reissue_token;
use super::handlers::session::secured_endpoint;
use super::middleware::require_session;
use crate::domain::account::ports::AuthServicePort;

pub struct AppState<AS: AuthServicePort> {
    pub auth_service: Arc<AS>,
    pub authenticator: Arc<Authenticator>,
}

impl<AS: AuthServicePort> Clone for AppState<AS> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<AS: AuthServicePort>(
    auth_service: Arc<AS>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/", get(health))
        .route("/register", post(register::<AS>))
        .route("/login", post(login::<AS>))
        .route("/users", get(list_users::<AS>));

    let protected_routes = Router::new()
        .route("/protected", get(protected))
        .route("/jwt", post(reissue_token::<AS>))
        .route("/logout", post(logout))
        .route("/secured-endpoint", post(secured_endpoint))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<AS>,
        ));

    // Headers are left out of the span: the session token travels in one.
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
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "Server is running"
}
