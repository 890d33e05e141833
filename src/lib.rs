pub mod catalog;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod submission;

use std::any::Any;
use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::Notifier;
use crate::error::SERVER_ERROR_MESSAGE;
use crate::state::{AppState, SharedState};
use crate::store::SubmissionStore;

pub fn build_app(
    config: Config,
    store: Arc<dyn SubmissionStore>,
    notifier: Arc<dyn Notifier>,
) -> Router {
    let max_body_size = config.max_body_size;
    let cors_origins = config.cors_origins.clone();
    let static_dir = config.static_dir.clone();

    let state: SharedState = Arc::new(AppState {
        config,
        store,
        notifier,
    });

    let mut router = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health));

    // Prebuilt site pages and assets, when deployed alongside the API.
    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    if !cors_origins.is_empty() {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(RequestBodyLimitLayer::new(max_body_size)),
        )
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "error": SERVER_ERROR_MESSAGE })),
    )
        .into_response()
}
