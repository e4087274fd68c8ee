//! Upload clients: the HTTP-backed bucket (feature `remote`) and an
//! in-memory stand-in.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::naming::{object_key, public_url, upload_url, DEFAULT_BUCKET};
use crate::{StorageError, StorageResult};

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Object key inside the bucket
    pub key: String,
    /// Public URL to store on the medical record
    pub public_url: String,
}

/// Anything that can take file bytes and hand back a public URL.
pub trait Bucket {
    /// Store the bytes under a generated key.
    fn upload(&self, bytes: &[u8], original_name: &str) -> StorageResult<UploadReceipt>;

    /// Upload and return just the public URL.
    fn upload_file_and_get_url(
        &self,
        bytes: &[u8],
        original_name: &str,
    ) -> StorageResult<String> {
        Ok(self.upload(bytes, original_name)?.public_url)
    }
}

/// In-process bucket for tests and offline development.
pub struct MemoryBucket {
    base_url: String,
    bucket: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBucket {
    /// Create an empty in-memory bucket.
    pub fn new() -> Self {
        Self {
            base_url: "memory://vetfiles".into(),
            bucket: DEFAULT_BUCKET.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Bytes stored under a key, if present.
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(key).cloned())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().map(|objects| objects.len()).unwrap_or(0)
    }

    /// True when nothing has been uploaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBucket {
    fn default() -> Self {
        Self::new()
    }
}

impl Bucket for MemoryBucket {
    fn upload(&self, bytes: &[u8], original_name: &str) -> StorageResult<UploadReceipt> {
        let key = object_key(original_name);
        self.objects
            .lock()
            .map_err(|e| StorageError::Transport(format!("Lock poisoned: {}", e)))?
            .insert(key.clone(), bytes.to_vec());
        Ok(UploadReceipt {
            public_url: public_url(&self.base_url, &self.bucket, &key),
            key,
        })
    }
}

/// HTTP upload client for the hosted object store.
#[cfg(feature = "remote")]
pub struct BucketClient {
    base_url: String,
    bucket: String,
    auth_token: String,
    http: reqwest::blocking::Client,
}

#[cfg(feature = "remote")]
impl BucketClient {
    /// Client against the default attachments bucket.
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self::with_bucket(base_url, auth_token, DEFAULT_BUCKET)
    }

    /// Client against a specific bucket.
    pub fn with_bucket(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            bucket: bucket.into(),
            auth_token: auth_token.into(),
            http: reqwest::blocking::Client::new(),
        }
    }
}

#[cfg(feature = "remote")]
impl Bucket for BucketClient {
    fn upload(&self, bytes: &[u8], original_name: &str) -> StorageResult<UploadReceipt> {
        let key = object_key(original_name);
        let response = self
            .http
            .post(upload_url(&self.base_url, &self.bucket, &key))
            .bearer_auth(&self.auth_token)
            .body(bytes.to_vec())
            .send()
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(StorageError::Rejected(format!(
                "{}: {}",
                status,
                server_message(&body)
            )));
        }

        Ok(UploadReceipt {
            public_url: public_url(&self.base_url, &self.bucket, &key),
            key,
        })
    }
}

/// The store reports failures as `{"message": "..."}`; fall back to the
/// raw body when it does not.
#[cfg(feature = "remote")]
fn server_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string())
}
