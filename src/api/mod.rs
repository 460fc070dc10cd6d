// API layer module (adapters over the company service)

pub mod errors;
pub mod handlers;
pub mod middleware;

use std::any::Any;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::jwt::TokenVerifier;
use crate::config::AuthConfig;
use crate::service::CompanyService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: CompanyService,
    pub auth: AuthState,
}

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<TokenVerifier>,
    pub admin_role: String,
}

impl AppState {
    pub fn new(service: CompanyService, auth_config: &AuthConfig) -> Self {
        Self {
            service,
            auth: AuthState {
                verifier: Arc::new(TokenVerifier::new(auth_config)),
                admin_role: auth_config.admin_role.clone(),
            },
        }
    }
}

/// Builds the application router. Shared by `main` and the integration
/// tests so both drive the same middleware stack.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/companies",
            get(handlers::companies::get_company)
                .post(handlers::companies::create_company)
                .delete(handlers::companies::delete_company)
                .patch(handlers::companies::update_company),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Per-request safety net: a panicking handler becomes a generic 500
/// without taking down other in-flight requests.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!(error = %detail, "unhandled panic while serving request");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}
