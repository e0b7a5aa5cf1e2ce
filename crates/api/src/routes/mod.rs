//! Route definitions.

mod dashboard;
mod health;
mod report;

use axum::http::{header, HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::rate_limit::limit_by_client;
use crate::state::AppState;

/// Build the complete relay router.
///
/// # Route Structure
///
/// ## Public (not rate limited)
/// - `GET /health` - Health check
///
/// ## Relayed (rate limited per client)
/// - `POST /report` - View details for `{workspaceId, viewId}`
/// - `GET /dashboard?dashboardId=..` - Dashboard details
///
/// CORS wraps everything, so preflight requests never count against a window
/// and rejections still carry the CORS headers.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    let public = Router::new().route("/health", get(health::health_check));

    let relayed = Router::new()
        .route("/report", post(report::fetch_report))
        .route("/dashboard", get(dashboard::fetch_dashboard))
        .layer(middleware::from_fn_with_state(state.clone(), limit_by_client));

    Router::new().merge(public).merge(relayed).layer(cors).with_state(state)
}

/// CORS policy for the configured origin allow-list.
///
/// A `*` entry allows any origin. Entries that are not valid header values
/// are skipped with a warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|origin| origin.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
