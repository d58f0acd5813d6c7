//! Morte Store - Reference tree and manifest persistence
//!
//! Provides:
//! - Atomic temp-file + rename writes and copies
//! - Manifest load/dump against the YAML format
//! - `ReferenceStore`: the reference directory tree and its manifest

pub mod atomic;
pub mod errors;
pub mod manifest_io;
pub mod reference;

// Re-export key types
pub use errors::Result;
pub use manifest_io::{dump_manifest, load_manifest};
pub use reference::{ReferenceStore, StoreLayout};
