use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OAuthError;

/// Tokens returned by the provider after a successful code exchange.
///
/// All four fields are required; a response missing any of them fails to
/// deserialize, so a partial record can never be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// The subset of a [`TokenRecord`] exposed by `GET /tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenRecord> for TokenPair {
    fn from(record: TokenRecord) -> Self {
        Self {
            access_token: record.access_token,
            refresh_token: record.refresh_token,
        }
    }
}

/// An OAuth 2.0 provider supporting the authorization-code grant.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Unique provider identifier (e.g., "zendesk_sell").
    fn id(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    /// Build the authorization URL that the user should be redirected to.
    fn auth_url(&self, redirect_uri: &str) -> String;

    /// Exchange an authorization code for a token record.
    ///
    /// `redirect_uri` must be the same value sent in the authorization step.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenRecord, OAuthError>;
}
