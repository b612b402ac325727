//! HTTP route tests

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use uuid::Uuid;

use shortlife::api::services::{AppStartTime, USER_ID_HEADER, health_routes, link_routes};
use shortlife::config::LinkConfig;
use shortlife::services::{InMemoryNotifier, LinkLifecycleService};
use shortlife::storage::InMemoryLinkStore;

// =============================================================================
// Test Setup
// =============================================================================

fn build_state() -> (Arc<LinkLifecycleService>, Arc<InMemoryNotifier>) {
    let notifier = Arc::new(InMemoryNotifier::new());
    let service = Arc::new(LinkLifecycleService::new(
        Arc::new(InMemoryLinkStore::new()),
        notifier.clone(),
        LinkConfig {
            base_url: "https://sho.rt".to_string(),
            ..LinkConfig::default()
        },
    ));
    (service, notifier)
}

macro_rules! app {
    ($service:expr, $notifier:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service.clone()))
                .app_data(web::Data::new($notifier.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .service(health_routes())
                .service(link_routes()),
        )
        .await
    };
}

// =============================================================================
// Tests
// =============================================================================

#[actix_rt::test]
async fn test_shorten_and_redirect() {
    let (service, notifier) = build_state();
    let app = app!(service, notifier);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "url": "https://example.com/page", "max_clicks": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    let code = body["data"]["code"].as_str().unwrap().to_string();
    assert_eq!(
        body["data"]["short_url"],
        format!("https://sho.rt/{}", code)
    );
    assert!(Uuid::parse_str(body["data"]["user_id"].as_str().unwrap()).is_ok());

    for _ in 0..2 {
        let req = TestRequest::get().uri(&format!("/api/{}", code)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get("Location").unwrap(),
            "https://example.com/page"
        );
    }

    // 点击额度已用完
    let req = TestRequest::get().uri(&format!("/api/{}", code)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
}

#[actix_rt::test]
async fn test_shorten_rejects_bad_input() {
    let (service, notifier) = build_state();
    let app = app!(service, notifier);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "url": "ftp://example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .insert_header((USER_ID_HEADER, "not-a-uuid"))
        .set_json(json!({ "url": "https://example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);

    assert!(service.is_empty());
}

#[actix_rt::test]
async fn test_list_requires_user_header() {
    let (service, notifier) = build_state();
    let app = app!(service, notifier);

    let req = TestRequest::get().uri("/api/links").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_list_and_delete_by_owner() {
    let (service, notifier) = build_state();
    let app = app!(service, notifier);
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let req = TestRequest::post()
        .uri("/api/shorten")
        .insert_header((USER_ID_HEADER, owner.to_string()))
        .set_json(json!({ "url": "https://example.com", "ttl_seconds": 60 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user_id"], owner.to_string());
    let code = body["data"]["code"].as_str().unwrap().to_string();

    let req = TestRequest::get()
        .uri("/api/links")
        .insert_header((USER_ID_HEADER, owner.to_string()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let links = body["data"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["code"], code);
    assert_eq!(links[0]["ttl_seconds"], 60);
    assert_eq!(links[0]["click_count"], 0);
    assert_eq!(links[0]["active"], true);

    let req = TestRequest::get()
        .uri("/api/links")
        .insert_header((USER_ID_HEADER, stranger.to_string()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let req = TestRequest::delete()
        .uri(&format!("/api/links/{}", code))
        .insert_header((USER_ID_HEADER, stranger.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);

    let req = TestRequest::delete()
        .uri(&format!("/api/links/{}", code))
        .insert_header((USER_ID_HEADER, owner.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::delete()
        .uri(&format!("/api/links/{}", code))
        .insert_header((USER_ID_HEADER, owner.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get()
        .uri("/api/notifications")
        .insert_header((USER_ID_HEADER, owner.to_string()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"],
        json!([
            format!("Link created: {}", code),
            format!("Link deleted: {}", code)
        ])
    );
}

#[actix_rt::test]
async fn test_redirect_unknown_code() {
    let (service, notifier) = build_state();
    let app = app!(service, notifier);

    let req = TestRequest::get().uri("/api/zzzzzz").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_health_reports_link_count() {
    let (service, notifier) = build_state();
    let app = app!(service, notifier);

    service
        .create(shortlife::services::CreateLinkRequest::new("https://example.com"))
        .unwrap();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["links_count"], 1);
}
