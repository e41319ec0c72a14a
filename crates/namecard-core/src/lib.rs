//! Core types for the namecard service.
//!
//! Holds the [`contact::Contact`] record, the pure normaliser that turns raw
//! reachability fields into links, and the store traits the other crates are
//! written against. No HTTP, database, or encoder dependencies live here.

pub mod action;
pub mod contact;
pub mod directory;
pub mod error;
pub mod normalize;
pub mod store;

pub use error::{Error, Result};
