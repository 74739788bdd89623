//! Listing logic for FileLight.
//!
//! Entry [`filter`]ing and sorting, [`natural`] name ordering, the
//! [`listing`] pipeline that ties them to a directory scan, and the
//! [`breadcrumb`] trail for the current directory.

pub mod breadcrumb;
pub mod filter;
pub mod listing;
pub mod natural;
