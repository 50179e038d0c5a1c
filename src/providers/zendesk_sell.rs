use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

use super::traits::{OAuthProvider, TokenRecord};
use crate::config::Config;
use crate::error::OAuthError;

/// Zendesk Sell (formerly Base) OAuth 2.0 provider.
///
/// Quirks:
/// - The client authenticates to the token endpoint with HTTP Basic auth,
///   not with `client_id`/`client_secret` form fields.
/// - Only an exact `200 OK` counts as success.
/// - No scopes are requested; the grant covers what the app registration allows.
pub struct ZendeskSellProvider {
    client_id: String,
    client_secret: String,
    authorize_endpoint: Url,
    token_endpoint: Url,
    http: reqwest::Client,
}

impl ZendeskSellProvider {
    pub fn new(
        client_id: String,
        client_secret: String,
        authorize_endpoint: Url,
        token_endpoint: Url,
        timeout: Duration,
    ) -> Result<Self, OAuthError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OAuthError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client_id,
            client_secret,
            authorize_endpoint,
            token_endpoint,
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, OAuthError> {
        Self::new(
            config.client_id.clone(),
            config.client_secret.clone(),
            config.auth_url.clone(),
            config.token_url.clone(),
            config.token_timeout,
        )
    }
}

#[async_trait]
impl OAuthProvider for ZendeskSellProvider {
    fn id(&self) -> &str {
        "zendesk_sell"
    }

    fn display_name(&self) -> &str {
        "Zendesk Sell"
    }

    fn auth_url(&self, redirect_uri: &str) -> String {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_uri);
        url.into()
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenRecord, OAuthError> {
        let resp = self
            .http
            .post(self.token_endpoint.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| OAuthError::TokenExchangeFailed(format!("Token request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| OAuthError::TokenExchangeFailed(format!("Failed to read token response: {e}")))?;

        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "token endpoint rejected the exchange");
            return Err(OAuthError::TokenExchangeFailed(body));
        }

        serde_json::from_str(&body).map_err(|e| {
            OAuthError::TokenExchangeFailed(format!("Failed to parse token response: {e}"))
        })
    }
}
