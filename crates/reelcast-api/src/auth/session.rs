//! Session token verification and cookie construction
//!
//! Tokens are HS256 JWTs signed with `SESSION_SECRET`. The same settings build
//! the `Set-Cookie` values used by session issuance, so the gate and the
//! issuer always agree on the cookie name.

use crate::auth::models::SessionClaims;
use axum::http::HeaderMap;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use reelcast_core::constants::USERNAME_COOKIE_NAME;
use reelcast_core::{AppError, Config};

/// HMAC keys derived from the session secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for `subject` valid for `ttl_secs`.
    pub fn encode_token(
        &self,
        subject: &str,
        username: Option<&str>,
        ttl_secs: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: subject.to_string(),
            username: username.map(str::to_string),
            exp: now + ttl_secs,
            iat: now,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    pub fn decode_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session token: {}", e)))
    }
}

/// Session gate and cookie settings
#[derive(Clone)]
pub struct SessionSettings {
    keys: Option<SessionKeys>,
    cookie_name: String,
    max_age_secs: i64,
    secure: bool,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        let session = config.session();
        Self {
            keys: session.secret.as_deref().map(SessionKeys::new),
            cookie_name: session.cookie_name.clone(),
            max_age_secs: session.max_age_secs,
            secure: config.is_production(),
        }
    }

    /// Whether requests must carry a valid session token.
    pub fn is_enforced(&self) -> bool {
        self.keys.is_some()
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Session verification disabled".to_string()))?;
        keys.decode_token(token)
    }

    /// Read the session token from the `Cookie` headers.
    pub fn token_from_headers<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        read_cookie(headers, &self.cookie_name)
    }

    pub fn session_cookie(&self, token: &str) -> String {
        self.build_cookie(&self.cookie_name, token, self.max_age_secs)
    }

    pub fn username_cookie(&self, username: &str) -> String {
        self.build_cookie(USERNAME_COOKIE_NAME, username, self.max_age_secs)
    }

    /// Cookies that remove both session cookies from the browser.
    pub fn cleared_cookies(&self) -> [String; 2] {
        [
            self.build_cookie(&self.cookie_name, "", 0),
            self.build_cookie(USERNAME_COOKIE_NAME, "", 0),
        ]
    }

    fn build_cookie(&self, name: &str, value: &str, max_age_secs: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            name, value, max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Find a cookie by name across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Cookie values may not contain separators, quotes or whitespace.
pub fn is_cookie_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\'))
}
