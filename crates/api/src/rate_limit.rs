//! Fixed-window rate limiting middleware.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tokio::task::JoinHandle;
use zanalytics_common::FixedWindowLimiter;

use crate::error::RelayError;
use crate::state::{AppState, ClientKey};

/// Middleware that counts each request against its client's window.
///
/// The client is the peer IP from `ConnectInfo<SocketAddr>`, so the server
/// must be started with `into_make_service_with_connect_info`. Admitted
/// responses carry `RateLimit-Limit`, `RateLimit-Remaining` and
/// `RateLimit-Reset` headers.
pub async fn limit_by_client(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RelayError> {
    let client: ClientKey = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let decision = state.limiter.check(&client);
    if !decision.allowed {
        tracing::warn!(client = ?client, "rate limit exceeded");
        return Err(RelayError::RateLimited { retry_after: decision.reset_after });
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("ratelimit-limit", HeaderValue::from(state.limiter.config().max_requests));
    headers.insert("ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert("ratelimit-reset", HeaderValue::from(decision.reset_after.as_secs()));
    Ok(response)
}

/// Periodically drop closed windows so idle clients do not accumulate.
pub fn spawn_window_pruner(limiter: FixedWindowLimiter<ClientKey>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.prune();
            tracing::debug!(tracked = limiter.tracked_keys(), "pruned rate limit windows");
        }
    })
}
