//! FileLight core library: confined directory browsing with sidecar descriptions.
//!
//! `filelight-core` holds everything a FileLight frontend needs that is not
//! transport: resolving request paths inside a browsing root, listing and
//! sorting directories, and reading and writing `DESCRIPT.ION` sidecars.
//! It knows nothing about HTTP or authentication; the web crate decides who
//! may edit and hands the core an [`AdminContext`].
//!
//! # Modules
//!
//! - [`browser`]: Request-level facade: [`Browser::browse`], [`Browser::update_description`], [`Browser::resolve_file`].
//! - [`fs`]: Root confinement, [`FileEntry`], directory reads, type classification, display formatting.
//! - [`meta`]: Sidecar grammar, the ordered [`MetadataMap`], and the locking [`MetadataStore`].
//! - [`nav`]: Listing pipeline: hiding, search, natural sorting, breadcrumbs.
//! - [`config`]: TOML-based browsing [`Settings`].
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod browser;
pub mod config;
pub mod error;
pub mod fs;
pub mod meta;
pub mod nav;

pub use browser::{
    AdminContext, BrowseRequest, Browser, Listing, UpdateOutcome, UpdateRequest,
};
pub use config::settings::Settings;
pub use error::{CoreError, CoreResult};
pub use fs::classify::{classify, Classification};
pub use fs::confine::{ConfinedPath, ConfinedRoot};
pub use fs::entry::FileEntry;
pub use fs::format::{entry_link, format_size};
pub use fs::ops::read_directory;
pub use meta::{MetadataMap, MetadataStore, SIDECAR_FILE_NAME};
pub use nav::breadcrumb::{build_breadcrumb, Crumb};
pub use nav::filter::{sort_entries, SortDirection, SortField};
pub use nav::listing::{list_directory, ListQuery};
pub use nav::natural::natural_cmp;
