//! Bearer credential types.
//!
//! [`AccessToken`] is the credential envelope issued by the storefront
//! backend on login or registration. It and [`Password`] are held as
//! secrets so they never show up in `Debug` output or logs.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Opaque bearer token for an authenticated session.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Decode the JWT payload segment without verifying the signature.
    ///
    /// Returns `None` if the token is not a JWT or the payload is not valid
    /// JSON. The server remains the only authority on token validity.
    #[must_use]
    pub fn claims(&self) -> Option<TokenClaims> {
        let payload = self.expose().split('.').nth(1)?;
        let payload = payload.trim_end_matches('=');

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .or_else(|_| STANDARD_NO_PAD.decode(payload))
            .ok()?;

        serde_json::from_slice(&bytes).ok()
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AccessToken {}

/// A password on its way to the server.
///
/// Serializes as a plain string but is redacted in `Debug` output.
#[derive(Clone)]
pub struct Password(SecretString);

impl Password {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(SecretString::from(password.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Serialize for Password {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self::new(password)
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self::new(password)
    }
}

/// Claims carried in an access token's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID).
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Expiry as a Unix timestamp in seconds.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at as a Unix timestamp in seconds.
    #[serde(default)]
    pub iat: Option<i64>,
    /// Any other claims the backend includes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TokenClaims {
    /// Expiry time, if the token carries one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether the token had expired at `now`.
    ///
    /// Tokens without an `exp` claim never expire client-side.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| expires_at <= now)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn jwt(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = AccessToken::new("super-secret-token");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn test_password_serializes_plain_but_debug_redacts() {
        let password = Password::from("Hunter2!");
        assert_eq!(serde_json::to_string(&password).unwrap(), "\"Hunter2!\"");
        assert_eq!(format!("{password:?}"), "[REDACTED]");
    }

    #[test]
    fn test_claims_decoded_from_payload() {
        let token = AccessToken::new(jwt(&serde_json::json!({
            "sub": "u-1",
            "email": "player1@example.com",
            "exp": 1_900_000_000,
            "role": "customer"
        })));

        let claims = token.claims().unwrap();
        assert_eq!(claims.sub.as_deref(), Some("u-1"));
        assert_eq!(claims.email.as_deref(), Some("player1@example.com"));
        assert_eq!(claims.extra["role"], "customer");
    }

    #[test]
    fn test_claims_none_for_opaque_token() {
        assert!(AccessToken::new("not-a-jwt").claims().is_none());
        assert!(AccessToken::new("a.%%%.c").claims().is_none());
    }

    #[test]
    fn test_expiry() {
        let token = AccessToken::new(jwt(&serde_json::json!({ "exp": 1_000 })));
        let claims = token.claims().unwrap();

        let before = DateTime::from_timestamp(999, 0).unwrap();
        let after = DateTime::from_timestamp(1_001, 0).unwrap();
        assert!(!claims.is_expired_at(before));
        assert!(claims.is_expired_at(after));
    }

    #[test]
    fn test_no_exp_never_expires() {
        let token = AccessToken::new(jwt(&serde_json::json!({ "sub": "u-1" })));
        assert!(!token.claims().unwrap().is_expired_at(Utc::now()));
    }
}
