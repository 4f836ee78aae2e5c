//! Platform abstraction layer
//!
//! Handles browser/native differences for storage:
//! - `MemoryStorage` everywhere (tests, ephemeral sessions)
//! - `FileStorage` on native (one JSON file per key)
//! - `LocalStorage` on web

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use storage::{KeyValueStore, MemoryStorage};
