//! Route handlers for the OAuth authorization-code flow.
//!
//! All handlers receive `SharedState` via Axum state extraction. The
//! session is identified by the signed cookie managed in `store::cookie`.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::OAuthError;
use crate::providers::{TokenPair, TokenRecord};
use crate::SharedState;

// =============================================================================
// Router
// =============================================================================

pub fn oauth_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/tokens", get(tokens))
        .route("/status", get(status))
        .with_state(state)
}

// =============================================================================
// Pages
// =============================================================================

async fn index(State(state): State<SharedState>) -> Html<String> {
    let name = state.provider.display_name();
    Html(format!(
        "<h1>{name} OAuth Example</h1>\n<a href=\"/login\">Login with {name}</a>\n"
    ))
}

async fn status(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "sell-oauth",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.provider.id(),
    }))
}

// =============================================================================
// OAuth Endpoints
// =============================================================================

/// GET /login — Redirect the browser to the provider's consent page.
async fn login(State(state): State<SharedState>) -> Response {
    let auth_url = state.provider.auth_url(&state.config.redirect_uri);
    info!(provider = state.provider.id(), "redirecting to authorization endpoint");

    (StatusCode::FOUND, [(header::LOCATION, auth_url)]).into_response()
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    /// Set by the provider when the user denies consent.
    error: Option<String>,
    error_description: Option<String>,
}

/// GET /callback — Exchange the authorization code and store the tokens.
async fn callback(
    State(state): State<SharedState>,
    jar: CookieJar,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<(CookieJar, Json<TokenRecord>), OAuthError> {
    // An unparseable query (e.g. a repeated `code`) carries no usable code.
    let Query(q) = query.map_err(|rejection| {
        warn!(%rejection, "malformed callback query");
        OAuthError::AuthorizationCodeMissing
    })?;

    let Some(code) = q.code.as_deref().filter(|c| !c.is_empty()) else {
        if let Some(error) = &q.error {
            warn!(
                %error,
                description = q.error_description.as_deref().unwrap_or_default(),
                "provider returned an authorization error"
            );
        }
        return Err(OAuthError::AuthorizationCodeMissing);
    };

    let (jar, session_id) = state.cookies.establish(jar)?;

    let record = state
        .provider
        .exchange_code(code, &state.config.redirect_uri)
        .await?;

    state.sessions.put(&session_id, record.clone()).await;

    let pretty = serde_json::to_string_pretty(&record).unwrap_or_default();
    info!(provider = state.provider.id(), "token exchange succeeded:\n{pretty}");

    Ok((jar, Json(record)))
}

/// GET /tokens — Return the token pair stored in this session.
async fn tokens(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Json<TokenPair>, OAuthError> {
    let session_id = state
        .cookies
        .session_id(&jar)
        .ok_or(OAuthError::NoActiveSession)?;

    let record = state
        .sessions
        .get(&session_id)
        .await
        .ok_or(OAuthError::NoActiveSession)?;

    Ok(Json(record.into()))
}
