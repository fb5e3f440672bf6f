//! Core types and components for the Hearth social directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! persistent store and the external profile source are reached through the
//! [`store::SocialStore`] and [`source::ProfileSource`] traits; everything
//! else (directory cache, friendship ledger, bootstrap seeding, timeline) is
//! implemented here on top of them.

pub mod directory;
pub mod error;
pub mod ledger;
pub mod message;
pub mod profile;
pub mod seed;
pub mod source;
pub mod store;
pub mod timeline;

pub use directory::Directory;
pub use error::{Error, Result};
pub use ledger::Ledger;

#[cfg(test)]
mod tests;
