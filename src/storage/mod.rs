//! Link storage
//!
//! The store is memory-resident; nothing survives a process restart.

pub mod link_store;
pub mod models;

pub use link_store::{InMemoryLinkStore, LinkRepository};
pub use models::{ClickOutcome, Link, LinkView};
