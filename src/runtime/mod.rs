//! Application lifecycle and execution modes
//!
//! - `lifetime`: wiring at startup, teardown at shutdown
//! - `modes`: HTTP server and interactive CLI
//! - `scheduler`: recurring expiry sweep

pub mod lifetime;
pub mod modes;
pub mod scheduler;
