use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::error::OAuthError;

type HmacSha256 = Hmac<Sha256>;

const MIN_KEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 32;
const SESSION_ID_BYTES: usize = 24;

/// Helper to create an HMAC instance, resolving trait ambiguity.
fn new_hmac(key: &[u8]) -> Result<HmacSha256, OAuthError> {
    <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| OAuthError::CryptoError(format!("HMAC init failed: {e}")))
}

/// Opaque per-browser session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session id.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// HMAC-SHA256 signing for session cookie values.
pub struct CookieSigner {
    key: Vec<u8>,
}

impl CookieSigner {
    /// Create a signer from a base64-encoded key of at least 32 bytes.
    pub fn new(secret_b64: &str) -> Result<Self, OAuthError> {
        let key = base64::engine::general_purpose::STANDARD
            .decode(secret_b64)
            .map_err(|e| OAuthError::CryptoError(format!("Invalid SESSION_SECRET base64: {e}")))?;

        if key.len() < MIN_KEY_LEN {
            return Err(OAuthError::CryptoError(format!(
                "SESSION_SECRET must be at least {MIN_KEY_LEN} bytes, got {}",
                key.len()
            )));
        }

        Ok(Self { key })
    }

    /// Create a signer with a random key. Cookies it signs do not survive a restart.
    pub fn random() -> Self {
        let mut key = vec![0u8; MIN_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    /// Sign a session id. Returns base64(hmac || id).
    pub fn sign(&self, id: &SessionId) -> Result<String, OAuthError> {
        let mut mac = new_hmac(&self.key)?;
        mac.update(id.as_str().as_bytes());
        let signature = mac.finalize().into_bytes();

        let mut combined = signature.to_vec();
        combined.extend_from_slice(id.as_str().as_bytes());

        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&combined))
    }

    /// Verify a cookie value and extract the session id it carries.
    ///
    /// Any malformed, truncated or tampered value yields `None`.
    pub fn verify(&self, signed: &str) -> Option<SessionId> {
        let combined = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(signed)
            .ok()?;

        if combined.len() <= SIGNATURE_LEN {
            return None;
        }

        let (signature, payload) = combined.split_at(SIGNATURE_LEN);

        let mut mac = new_hmac(&self.key).ok()?;
        mac.update(payload);
        mac.verify_slice(signature).ok()?;

        String::from_utf8(payload.to_vec()).ok().map(SessionId)
    }
}
