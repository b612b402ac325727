use std::sync::Arc;

use actix_web::{Responder, Scope, web};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::helpers::success_response;
use crate::services::LinkLifecycleService;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub links_count: usize,
    pub uptime_secs: i64,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        service: web::Data<Arc<LinkLifecycleService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");

        let uptime = chrono::Utc::now() - app_start_time.start_datetime;
        success_response(HealthResponse {
            status: "healthy".to_string(),
            links_count: service.len(),
            uptime_secs: uptime.num_seconds().max(0),
        })
    }
}

pub fn health_routes() -> Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
