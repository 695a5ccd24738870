//! The object-store seam.
//!
//! `PracticeRepository` is generic over `ObjectStore`, so production code runs
//! against S3 and tests run against `MemoryObjectStore`.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use aws_sdk_s3::Client;

use crate::error::StorageError;
use crate::objects;

/// Body and content type of a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

pub trait ObjectStore: Send + Sync {
    fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Fails with `StorageError::NotFound` when the key is absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<StoredObject, StorageError>> + Send;

    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Keys under `prefix`, in lexicographic order.
    fn list(&self, prefix: &str) -> impl Future<Output = Result<Vec<String>, StorageError>> + Send;
}

/// S3-backed store for one bucket.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        objects::put_object(&self.client, &self.bucket, key, body, content_type).await
    }

    async fn get(&self, key: &str) -> Result<StoredObject, StorageError> {
        objects::get_object(&self.client, &self.bucket, key).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        objects::delete_object(&self.client, &self.bucket, key).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = objects::list_objects(&self.client, &self.bucket, prefix).await?;
        keys.sort();
        Ok(keys)
    }
}

#[derive(Default)]
struct MemoryState {
    objects: BTreeMap<String, StoredObject>,
    failing_puts: Vec<String>,
    failing_deletes: Vec<String>,
}

/// In-process store. Clones share the same contents.
///
/// Writes and deletes can be made to fail for keys containing a given
/// fragment, which is how tests exercise partial failures.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every `put` to a key containing `fragment` fails from now on.
    pub fn fail_puts_containing(&self, fragment: impl Into<String>) {
        self.lock().failing_puts.push(fragment.into());
    }

    /// Every `delete` of a key containing `fragment` fails from now on.
    pub fn fail_deletes_containing(&self, fragment: impl Into<String>) {
        self.lock().failing_deletes.push(fragment.into());
    }

    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.failing_puts.clear();
        state.failing_deletes.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().objects.contains_key(key)
    }

    /// All keys currently stored, in order.
    pub fn keys(&self) -> Vec<String> {
        self.lock().objects.keys().cloned().collect()
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut state = self.lock();
        if state.failing_puts.iter().any(|f| key.contains(f.as_str())) {
            return Err(StorageError::PutObject(format!("injected failure for {key}")));
        }
        state.objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<StoredObject, StorageError> {
        self.lock()
            .objects
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        if state.failing_deletes.iter().any(|f| key.contains(f.as_str())) {
            return Err(StorageError::DeleteObject(format!(
                "injected failure for {key}"
            )));
        }
        state.objects.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .lock()
            .objects
            .range(prefix.to_string()..)
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
