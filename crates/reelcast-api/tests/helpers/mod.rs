//! Test helpers: build AppState and router for integration tests.
//!
//! Storage is an in-memory signer; the provider is the real HTTP client pointed
//! at a `mockito` server, so requests go through the full stack.

#![allow(dead_code)]

pub mod auth;
pub mod storage;

use axum_test::TestServer;
use reelcast_api::constants;
use reelcast_api::setup::{routes, services};
use reelcast_core::{Config, ServiceConfig};
use reelcast_provider::{GenerationProvider, PolloProvider};
use reelcast_storage::Storage;
use std::collections::HashMap;
use std::sync::Arc;

pub use storage::FakeStorage;

/// Provider credential used by every test app.
pub const TEST_PROVIDER_KEY: &str = "test-provider-key";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Options for a test application.
pub struct TestAppOptions {
    pub provider_url: Option<String>,
    pub provider_timeout_secs: u64,
    pub with_storage: bool,
    pub session_secret: Option<&'static str>,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            provider_url: None,
            provider_timeout_secs: 5,
            with_storage: true,
            session_secret: Some(auth::TEST_SESSION_SECRET),
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<FakeStorage>,
    pub config: Config,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(options: &TestAppOptions) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("ENVIRONMENT", "test".to_string());
    vars.insert("UPLOAD_STAGING_PREFIX", "temp".to_string());
    vars.insert("PUBLIC_BASE_URL", "https://media.example.com".to_string());
    if let Some(ref url) = options.provider_url {
        vars.insert("POLLO_AI_API_KEY", TEST_PROVIDER_KEY.to_string());
        vars.insert("PROVIDER_BASE_URL", url.clone());
        vars.insert(
            "PROVIDER_TIMEOUT_SECS",
            options.provider_timeout_secs.to_string(),
        );
    }
    if let Some(secret) = options.session_secret {
        vars.insert("SESSION_SECRET", secret.to_string());
    }

    let config = ServiceConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("test configuration must be valid");
    Config(Box::new(config))
}

/// Setup a test app with the given collaborators.
pub fn setup_test_app(options: TestAppOptions) -> TestApp {
    let config = test_config(&options);

    let storage = Arc::new(FakeStorage::new("https://media.example.com"));
    let storage_backend: Option<Arc<dyn Storage>> = options
        .with_storage
        .then(|| storage.clone() as Arc<dyn Storage>);

    let provider: Option<Arc<dyn GenerationProvider>> = match config.provider().api_key {
        Some(ref key) => Some(Arc::new(
            PolloProvider::new(key.clone(), config.provider())
                .expect("Failed to build provider client"),
        )),
        None => None,
    };

    let state = services::build_state(&config, storage_backend, provider);
    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        config,
    }
}
