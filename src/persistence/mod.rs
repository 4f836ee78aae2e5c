//! Persistence over a key-value backend
//!
//! Features:
//! - Whole-document JSON writes (no diffs)
//! - Tombstone set so deleted checklists never reappear
//! - Cascading delete from a template to its instances
//! - Corrupt or missing documents load as empty/default

pub mod checklists;
pub mod ship;
pub mod transfer;

pub use checklists::ChecklistStore;
pub use ship::ShipDetailsStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};
use crate::platform::KeyValueStore;

/// Decode the document under `key`. Missing, unreadable and corrupt all give `None`.
pub(crate) fn read_document<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let json = match storage.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding corrupt '{}': {}", key, e);
            None
        }
    }
}

/// Encode `value` and store it under `key`
pub(crate) fn write_document<T, S>(storage: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(StoreError::Encode)?;
    storage.set(key, &json)?;
    Ok(())
}
