//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - REPL mode (interactive shell)
//! - Config commands

pub mod config;
#[cfg(feature = "cli")]
pub mod repl;
pub mod server;

pub use config::generate_config;
#[cfg(feature = "cli")]
pub use repl::run_repl;
pub use server::run_server;
