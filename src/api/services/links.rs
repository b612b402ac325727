//! Link routes
//!
//! Owner identity travels in the `X-User-Id` header. Creating without it
//! mints a new owner id and returns it to the caller.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Scope, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use super::helpers::{ErrorCode, api_result, error_response, json_response, success_response};
use crate::errors::{Result, ShortlifeError};
use crate::services::{CreateLinkRequest, InMemoryNotifier, LinkLifecycleService};
use crate::storage::LinkView;
use crate::utils::validate_target_url;

pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenRequest {
    pub url: String,
    pub max_clicks: Option<u32>,
    pub ttl_seconds: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub user_id: Uuid,
}

/// Parse `X-User-Id` if present
fn owner_from_header(req: &HttpRequest) -> Result<Option<Uuid>> {
    let Some(value) = req.headers().get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let raw = value
        .to_str()
        .map_err(|_| ShortlifeError::validation("X-User-Id header is not valid ASCII"))?;
    Uuid::parse_str(raw.trim())
        .map(Some)
        .map_err(|_| ShortlifeError::validation(format!("Invalid X-User-Id '{}'", raw)))
}

fn require_owner(req: &HttpRequest) -> Result<Uuid> {
    owner_from_header(req)?
        .ok_or_else(|| ShortlifeError::validation("X-User-Id header is required"))
}

pub struct LinkApi;

impl LinkApi {
    pub async fn shorten(
        req: HttpRequest,
        body: web::Json<ShortenRequest>,
        service: web::Data<Arc<LinkLifecycleService>>,
    ) -> impl Responder {
        let result = owner_from_header(&req).and_then(|owner_id| {
            let body = body.into_inner();
            let target_url = validate_target_url(&body.url)?;
            let link = service.create(CreateLinkRequest {
                target_url,
                owner_id,
                max_clicks: body.max_clicks,
                ttl_seconds: body.ttl_seconds,
            })?;

            Ok(ShortenResponse {
                code: link.code.clone(),
                short_url: service.short_url(&link),
                user_id: link.owner_id,
            })
        });

        api_result(result)
    }

    pub async fn redirect(
        path: web::Path<String>,
        service: web::Data<Arc<LinkLifecycleService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match service.resolve(&code) {
            Some(link) => {
                trace!("Redirecting '{}' -> '{}'", code, link.target_url);
                HttpResponse::build(StatusCode::FOUND)
                    .insert_header(("Location", link.target_url.as_str()))
                    .finish()
            }
            None => {
                debug!("Redirect miss for '{}'", code);
                json_response::<()>(
                    StatusCode::NOT_FOUND,
                    ErrorCode::LinkNotFound,
                    "Link not found or inactive/expired",
                    None,
                )
            }
        }
    }

    pub async fn list(
        req: HttpRequest,
        service: web::Data<Arc<LinkLifecycleService>>,
    ) -> impl Responder {
        let result = require_owner(&req).map(|owner_id| {
            let now = Utc::now();
            service
                .list_owned(owner_id)
                .iter()
                .map(|link| link.view(now))
                .collect::<Vec<LinkView>>()
        });

        api_result(result)
    }

    pub async fn delete(
        req: HttpRequest,
        path: web::Path<String>,
        service: web::Data<Arc<LinkLifecycleService>>,
    ) -> impl Responder {
        let code = path.into_inner();
        let outcome = require_owner(&req).and_then(|owner_id| service.delete(&code, owner_id));

        match outcome {
            Ok(true) => success_response(code),
            Ok(false) => error_response(&ShortlifeError::not_found(format!(
                "Link '{}' not found",
                code
            ))),
            Err(e) => error_response(&e),
        }
    }

    pub async fn notifications(
        req: HttpRequest,
        notifier: web::Data<Arc<InMemoryNotifier>>,
    ) -> impl Responder {
        api_result(require_owner(&req).map(|owner_id| notifier.notifications(owner_id)))
    }
}

/// `/api` 路由
pub fn link_routes() -> Scope {
    web::scope("/api")
        .route("/shorten", web::post().to(LinkApi::shorten))
        .route("/links", web::get().to(LinkApi::list))
        .route("/links/{code}", web::delete().to(LinkApi::delete))
        .route("/notifications", web::get().to(LinkApi::notifications))
        .route("/{code}", web::get().to(LinkApi::redirect))
        .route("/{code}", web::head().to(LinkApi::redirect))
}
