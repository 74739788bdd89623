//! File system abstractions for FileLight.
//!
//! This module provides root confinement ([`confine::ConfinedRoot`]), the
//! entry type ([`entry::FileEntry`]), directory reads
//! ([`ops::read_directory`]), extension classification ([`classify`]) and
//! display formatting ([`format`]).

pub mod classify;
pub mod confine;
pub mod entry;
pub mod format;
pub mod ops;

pub use classify::{classify, Classification, ClassificationEntry};
pub use confine::{ConfinedPath, ConfinedRoot};
