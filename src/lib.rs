//! Checklist Core - templates, instances and completion over a key-value store
//!
//! Core modules:
//! - `model`: Checklists, items and the ship details aggregate
//! - `lifecycle`: Template -> instance -> completed, completion scoring
//! - `persistence`: Checklist and ship stores, import/export
//! - `platform`: Key-value storage backends (memory, files, LocalStorage)
//! - `location`: Suggestions for location items from ship area tags
//! - `settings`: Storage keys

pub mod error;
pub mod lifecycle;
pub mod location;
pub mod model;
pub mod persistence;
pub mod platform;
pub mod serial;
pub mod settings;

pub use error::{ChecklistError, StorageError, StoreError, TransferError};
pub use model::{Checklist, ChecklistItem, ChecklistItemType, ChecklistState};
pub use persistence::{ChecklistStore, ShipDetailsStore};
pub use platform::{KeyValueStore, MemoryStorage};
pub use settings::Settings;

/// Limits and formats
pub mod consts {
    /// Most items a checklist may hold
    pub const MAX_ITEMS: usize = 100;

    /// Characters used in template and tag serial codes
    pub const SERIAL_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    pub const TEMPLATE_SERIAL_LEN: usize = 10;
    pub const TAG_SERIAL_LEN: usize = 6;

    /// Locations a new location item accepts
    pub const DEFAULT_MAX_LOCATIONS: u32 = 1;
}
