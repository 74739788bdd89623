//! Sidecar descriptions.
//!
//! Each directory may hold a plain-text sidecar ([`store::SIDECAR_FILE_NAME`])
//! mapping file names to free-text descriptions. [`parse`] holds the line
//! grammar, [`map::MetadataMap`] the in-memory form and
//! [`store::MetadataStore`] the read fallback and locked writes.

pub mod map;
pub mod parse;
pub mod store;

pub use map::MetadataMap;
pub use store::{MetadataStore, SIDECAR_FILE_NAME};
