//! Session cookie handling: maps a browser to a [`SessionId`].

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::time::Duration;

use crate::crypto::{CookieSigner, SessionId};
use crate::error::OAuthError;

/// Name of the cookie carrying the signed session id.
pub const SESSION_COOKIE: &str = "sell_session";

/// Reads and issues signed session cookies.
pub struct SessionCookies {
    signer: CookieSigner,
    secure: bool,
    max_age: Duration,
}

impl SessionCookies {
    /// `max_age` should match the session store TTL.
    pub fn new(signer: CookieSigner, secure: bool, max_age: Duration) -> Self {
        Self {
            signer,
            secure,
            max_age,
        }
    }

    /// Session id carried by the request, if its cookie verifies.
    pub fn session_id(&self, jar: &CookieJar) -> Option<SessionId> {
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| self.signer.verify(cookie.value()))
    }

    /// Reuse the request's session or start a new one.
    ///
    /// A new session adds a `Set-Cookie` to the returned jar.
    pub fn establish(&self, jar: CookieJar) -> Result<(CookieJar, SessionId), OAuthError> {
        if let Some(id) = self.session_id(&jar) {
            return Ok((jar, id));
        }

        let id = SessionId::generate();
        let cookie = Cookie::build((SESSION_COOKIE, self.signer.sign(&id)?))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(
                i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX),
            ));

        tracing::debug!("issued new session cookie");
        Ok((jar.add(cookie), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies() -> SessionCookies {
        SessionCookies::new(CookieSigner::random(), false, Duration::from_secs(3600))
    }

    #[test]
    fn test_establish_issues_cookie_once() {
        let cookies = cookies();

        let (jar, id) = cookies.establish(CookieJar::new()).unwrap();
        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
        let issued = cookie.value().to_string();
        assert_eq!(cookies.session_id(&jar), Some(id.clone()));

        let returning = CookieJar::new().add(Cookie::new(SESSION_COOKIE, issued));
        let (_, again) = cookies.establish(returning).unwrap();
        assert_eq!(again, id);
    }

    #[test]
    fn test_forged_cookie_is_ignored() {
        let cookies = cookies();
        let forged = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "forged-value"));
        assert!(cookies.session_id(&forged).is_none());

        let (_, id) = cookies.establish(forged).unwrap();
        assert!(!id.as_str().is_empty());
    }
}
