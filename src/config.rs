use anyhow::{bail, Context, Result};
use std::time::Duration;
use url::Url;

/// Zendesk Sell authorization endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://api.getbase.com/oauth2/authorize";
/// Zendesk Sell token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://api.getbase.com/oauth2/token";

/// Application configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // ── Server ──────────────────────────────────────────────────────────
    pub host: String,
    pub port: u16,

    // ── OAuth Client ────────────────────────────────────────────────────
    pub client_id: String,
    pub client_secret: String,
    /// Must match the redirect URI registered with the provider exactly.
    pub redirect_uri: String,

    // ── Provider Endpoints ──────────────────────────────────────────────
    pub auth_url: Url,
    pub token_url: Url,
    pub token_timeout: Duration,

    // ── Session Cookie ──────────────────────────────────────────────────
    /// Base64-encoded HMAC key for session cookies. `None` means a random
    /// key is generated per process.
    pub session_secret: Option<String>,
    pub cookie_secure: bool,
    /// Lifetime of a stored token record and of its session cookie.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} is required"))
        };

        let timeout_secs: u64 = var("TOKEN_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .context("Invalid TOKEN_REQUEST_TIMEOUT_SECS")?;
        if timeout_secs == 0 {
            bail!("TOKEN_REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        let ttl_secs: u64 = var("SESSION_TTL_SECS")
            .unwrap_or_else(|| "86400".into())
            .parse()
            .context("Invalid SESSION_TTL_SECS")?;
        if ttl_secs == 0 {
            bail!("SESSION_TTL_SECS must be greater than zero");
        }

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("PORT")
                .unwrap_or_else(|| "5000".into())
                .parse()
                .context("Invalid PORT")?,

            client_id: required("ZENDESK_CLIENT_ID")?,
            client_secret: required("ZENDESK_CLIENT_SECRET")?,
            redirect_uri: required("REDIRECT_URI")?,

            auth_url: Url::parse(&var("ZENDESK_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.into()))
                .context("Invalid ZENDESK_AUTH_URL")?,
            token_url: Url::parse(
                &var("ZENDESK_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.into()),
            )
            .context("Invalid ZENDESK_TOKEN_URL")?,
            token_timeout: Duration::from_secs(timeout_secs),

            session_secret: var("SESSION_SECRET").filter(|v| !v.is_empty()),
            cookie_secure: var("SESSION_COOKIE_SECURE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            session_ttl: Duration::from_secs(ttl_secs),
        })
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("ZENDESK_CLIENT_ID", "client-123"),
        ("ZENDESK_CLIENT_SECRET", "shh"),
        ("REDIRECT_URI", "http://localhost:5000/callback"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(lookup(BASE)).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.auth_url.as_str(), DEFAULT_AUTH_URL);
        assert_eq!(config.token_url.as_str(), DEFAULT_TOKEN_URL);
        assert_eq!(config.token_timeout, Duration::from_secs(30));
        assert!(config.session_secret.is_none());
        assert!(!config.cookie_secure);
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn test_missing_client_secret_is_rejected() {
        let err = Config::from_vars(lookup(&BASE[..1])).unwrap_err();
        assert!(err.to_string().contains("ZENDESK_CLIENT_SECRET"));
    }

    #[test]
    fn test_blank_redirect_uri_counts_as_missing() {
        let mut vars = BASE.to_vec();
        vars[2] = ("REDIRECT_URI", "  ");
        let err = Config::from_vars(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("REDIRECT_URI"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = BASE.to_vec();
        vars.extend([
            ("PORT", "8080"),
            ("ZENDESK_TOKEN_URL", "http://127.0.0.1:9999/oauth2/token"),
            ("SESSION_COOKIE_SECURE", "TRUE"),
            ("TOKEN_REQUEST_TIMEOUT_SECS", "5"),
            ("SESSION_TTL_SECS", "600"),
        ]);
        let config = Config::from_vars(lookup(&vars)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_url.as_str(), "http://127.0.0.1:9999/oauth2/token");
        assert!(config.cookie_secure);
        assert_eq!(config.token_timeout, Duration::from_secs(5));
        assert_eq!(config.session_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_zero_session_ttl_is_rejected() {
        let mut vars = BASE.to_vec();
        vars.push(("SESSION_TTL_SECS", "0"));
        let err = Config::from_vars(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_SECS"));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = BASE.to_vec();
        vars.push(("PORT", "not-a-port"));
        assert!(Config::from_vars(lookup(&vars)).is_err());
    }
}
