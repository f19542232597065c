//! Signed-cookie session storage.
//!
//! The session lives entirely in the client's cookie, signed with a key derived
//! from the configured secret. Tampered or unreadable cookies yield a fresh session.

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use bizbot_core::Session;
use sha2::{Digest, Sha512};

/// Derive the cookie signing key from `secret`, or generate a per-process key.
pub fn signing_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => {
            tracing::warn!(
                "No session secret configured (SECRET_KEY); sessions will not survive a restart"
            );
            Key::generate()
        }
    }
}

pub fn load_session(jar: &SignedCookieJar, cookie_name: &str) -> Session {
    jar.get(cookie_name)
        .map(|c| Session::decode(c.value()))
        .unwrap_or_default()
}

pub fn store_session(jar: SignedCookieJar, cookie_name: &str, session: &Session) -> SignedCookieJar {
    let cookie = Cookie::build((cookie_name.to_string(), session.encode()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    jar.add(cookie)
}
