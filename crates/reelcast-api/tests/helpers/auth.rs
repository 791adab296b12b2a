use reelcast_api::auth::SessionKeys;

/// Test session secret (must be at least 32 characters).
pub const TEST_SESSION_SECRET: &str = "test-session-secret-at-least-32-characters";

/// Sign a session token for `subject` with the test secret.
pub fn session_token(subject: &str, username: Option<&str>, ttl_secs: i64) -> String {
    SessionKeys::new(TEST_SESSION_SECRET)
        .encode_token(subject, username, ttl_secs)
        .expect("Failed to sign test token")
}

/// `Cookie` header value carrying a valid session.
pub fn session_cookie() -> String {
    format!("auth-token={}", session_token("user-1", Some("ada"), 3600))
}
