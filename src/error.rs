use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for the sell-oauth service.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    // ── Client Errors ───────────────────────────────────────────────────
    #[error("Authorization code not received.")]
    AuthorizationCodeMissing,

    /// Carries the provider's raw response body, or the transport failure
    /// message when no response was received.
    #[error("Failed to get access token")]
    TokenExchangeFailed(String),

    #[error("No tokens found in session")]
    NoActiveSession,

    // ── Internal ────────────────────────────────────────────────────────
    #[error("Crypto error: {0}")]
    CryptoError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OAuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            OAuthError::AuthorizationCodeMissing => StatusCode::BAD_REQUEST,
            OAuthError::TokenExchangeFailed(_) => StatusCode::BAD_REQUEST,
            OAuthError::NoActiveSession => StatusCode::NOT_FOUND,
            OAuthError::CryptoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OAuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON payload returned to the caller.
    pub fn body(&self) -> serde_json::Value {
        match self {
            OAuthError::TokenExchangeFailed(details) => json!({
                "error": self.to_string(),
                "details": details,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        let pretty = serde_json::to_string_pretty(&body).unwrap_or_default();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed:\n{pretty}");
        } else {
            tracing::warn!(status = status.as_u16(), "request failed:\n{pretty}");
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_failure_carries_details_verbatim() {
        let err = OAuthError::TokenExchangeFailed("invalid_grant".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            json!({ "error": "Failed to get access token", "details": "invalid_grant" })
        );
    }

    #[test]
    fn test_missing_code_and_missing_session_payloads() {
        assert_eq!(
            OAuthError::AuthorizationCodeMissing.body(),
            json!({ "error": "Authorization code not received." })
        );
        assert_eq!(OAuthError::NoActiveSession.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            OAuthError::NoActiveSession.body(),
            json!({ "error": "No tokens found in session" })
        );
    }
}
