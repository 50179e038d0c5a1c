//! HTTP router for sell-oauth.
//!
//! - `/`         — landing page with a login link
//! - `/login`    — redirect to the provider's authorization endpoint
//! - `/callback` — authorization-code exchange
//! - `/tokens`   — tokens stored in the current session
//! - `/status`   — health check

pub mod routes;

use crate::SharedState;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn router(state: SharedState) -> Router {
    routes::oauth_router(state).layer(TraceLayer::new_for_http())
}
