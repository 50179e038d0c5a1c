pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod providers;
pub mod store;

pub use config::Config;
pub use error::OAuthError;

use std::sync::Arc;

use crypto::CookieSigner;
use providers::{OAuthProvider, ZendeskSellProvider};
use store::{SessionCookies, SessionStore};

/// Shared application state passed to all API handlers.
pub struct AppState {
    pub config: Config,
    pub provider: Box<dyn OAuthProvider>,
    pub sessions: SessionStore,
    pub cookies: SessionCookies,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build state backed by the Zendesk Sell provider.
    pub fn new(config: Config) -> Result<Self, OAuthError> {
        let provider = ZendeskSellProvider::from_config(&config)?;
        Self::with_provider(config, Box::new(provider))
    }

    /// Build state around an arbitrary provider implementation.
    pub fn with_provider(
        config: Config,
        provider: Box<dyn OAuthProvider>,
    ) -> Result<Self, OAuthError> {
        let signer = match &config.session_secret {
            Some(secret) => CookieSigner::new(secret)?,
            None => {
                tracing::warn!("SESSION_SECRET not set; session cookies are valid for this process only");
                CookieSigner::random()
            }
        };
        let cookies = SessionCookies::new(signer, config.cookie_secure, config.session_ttl);
        let sessions = SessionStore::new(config.session_ttl);

        Ok(Self {
            config,
            provider,
            sessions,
            cookies,
        })
    }
}
