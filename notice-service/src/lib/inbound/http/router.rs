use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_notice::create_notice;
use super::handlers::create_user::create_user;
use super::handlers::delete_notice::delete_notice;
use super::handlers::list_notices::list_notices;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::seed_admin::seed_admin;
use super::middleware::authenticate as auth_middleware;
use crate::config::Environment;
use crate::notice::ports::NoticeServicePort;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub notice_service: Arc<dyn NoticeServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
    pub environment: Environment,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    notice_service: Arc<dyn NoticeServicePort>,
    authenticator: Arc<Authenticator>,
    jwt_expiration_hours: i64,
    environment: Environment,
) -> Router {
    let state = AppState {
        user_service,
        notice_service,
        authenticator,
        jwt_expiration_hours,
        environment,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/users/seed-admin", post(seed_admin));

    // Everything below requires a valid bearer token; per-role requirements
    // are enforced by the guard extractors on the individual handlers.
    let protected_routes = Router::new()
        .route("/api/notices", get(list_notices).post(create_notice))
        .route("/api/notices/:notice_id", delete(delete_notice))
        .route("/api/users", get(list_users).post(create_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
