//! Service layer for business logic
//!
//! Shared by every front end (HTTP API, interactive CLI) and the
//! background cleanup scheduler.

pub mod code_generator;
pub mod link_service;
pub mod notification;

pub use code_generator::{CodeGenerator, random_code};
pub use link_service::{CreateLinkRequest, LinkLifecycleService};
pub use notification::{InMemoryNotifier, LogNotifier, NotificationSink};
