//! market-core - Core library for Campus Market
//!
//! This crate contains the record types, the remote directory client (auth +
//! document store), and the page flows shared by the Campus Market front end:
//! the session gate, listing feed, detail overlay, and submission flow.

pub mod auth;
pub mod card;
pub mod config;
pub mod detail;
pub mod directory;
pub mod error;
pub mod feed;
pub mod gate;
pub mod models;
pub mod page;
pub mod submit;
pub mod util;

pub use error::{Error, Result};
pub use models::{BorrowRequest, Category, Identity, Listing};

#[cfg(test)]
mod tests;
