use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::store::ObjectStore;

const JSON: &str = "application/json";

/// Load one JSON row.
pub async fn load_json<S, T>(store: &S, key: &str) -> Result<T, StorageError>
where
    S: ObjectStore,
    T: DeserializeOwned,
{
    let object = store.get(key).await?;
    Ok(serde_json::from_slice(&object.body)?)
}

/// Save one JSON row, replacing any previous version.
pub async fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: ObjectStore,
    T: Serialize,
{
    let body = serde_json::to_vec_pretty(value)?;
    store.put(key, body, Some(JSON)).await
}

/// Load every `.json` row directly under `prefix`. Nested keys are skipped.
pub async fn load_all<S, T>(store: &S, prefix: &str) -> Result<Vec<T>, StorageError>
where
    S: ObjectStore,
    T: DeserializeOwned,
{
    let keys: Vec<String> = store
        .list(prefix)
        .await?
        .into_iter()
        .filter(|k| is_direct_row(prefix, k))
        .collect();
    let mut rows = Vec::with_capacity(keys.len());
    for key in &keys {
        rows.push(load_json(store, key).await?);
    }
    Ok(rows)
}

fn is_direct_row(prefix: &str, key: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| !rest.contains('/') && rest.ends_with(".json"))
}
