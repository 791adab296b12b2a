use async_trait::async_trait;
use reelcast_storage::{Storage, StorageResult};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory signer that records which keys it signed.
pub struct FakeStorage {
    public_base_url: String,
    signed_keys: Mutex<Vec<String>>,
}

impl FakeStorage {
    pub fn new(public_base_url: &str) -> Self {
        Self {
            public_base_url: public_base_url.to_string(),
            signed_keys: Mutex::new(Vec::new()),
        }
    }

    pub fn signed_keys(&self) -> Vec<String> {
        self.signed_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.signed_keys
            .lock()
            .unwrap()
            .push(storage_key.to_string());
        Ok(format!(
            "https://bucket.storage.test/{}?X-Amz-Expires={}&X-Amz-Signature=fake",
            storage_key,
            expires_in.as_secs()
        ))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.public_base_url, storage_key)
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}
