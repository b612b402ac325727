//! HTTP front end
//!
//! Thin route dispatch onto [`crate::services::LinkLifecycleService`].

pub mod services;
