//! Configuration for FileLight.
//!
//! Browsing settings ([`settings::Settings`]) are stored as TOML and loaded
//! at startup.

pub mod settings;
