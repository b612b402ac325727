//! Shortlife - short links with click budgets and expiry
//!
//! Maps long URLs to deterministic short codes, serves redirects while
//! enforcing per-link click budgets and TTLs, and reclaims expired entries
//! with a background sweep. Everything is memory-resident.
//!
//! # Architecture
//! - `services`: code generation, lifecycle service, notifications
//! - `storage`: link model and the concurrent in-memory store
//! - `runtime`: startup/shutdown, cleanup scheduler, server and REPL modes
//! - `api`: HTTP routes
//! - `config`: static configuration
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
