pub mod health;
pub mod helpers;
pub mod links;

pub use health::{AppStartTime, HealthService, health_routes};
pub use helpers::{ApiResponse, ErrorCode};
pub use links::{LinkApi, ShortenRequest, ShortenResponse, USER_ID_HEADER, link_routes};
