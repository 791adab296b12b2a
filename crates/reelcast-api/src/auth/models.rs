use serde::{Deserialize, Serialize};

/// Session token claims (HS256)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Caller identity stored in request extensions by the session gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Token subject, or `anonymous` when the gate is disabled.
    pub subject: String,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self {
            subject: "anonymous".to_string(),
        }
    }
}

impl From<SessionClaims> for SessionContext {
    fn from(claims: SessionClaims) -> Self {
        Self {
            subject: claims.sub,
        }
    }
}
