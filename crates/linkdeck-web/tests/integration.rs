//! Integration tests for the linkdeck-web crate.
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`, so the
//! full extractor/handler/error-mapping path runs without binding a
//! listener.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use linkdeck_session::{COOKIE_NAME, SessionCodec};
use linkdeck_store::Database;
use linkdeck_web::{WebConfig, WebServer};

const SECRET: &[u8] = b"integration-test-secret";

#[test]
fn web_config_defaults() {
    let config = WebConfig::default();
    assert_eq!(config.bind_addr, "127.0.0.1");
    assert_eq!(config.port, 8420);
}

#[test]
fn web_config_custom() {
    let config = WebConfig {
        bind_addr: "0.0.0.0".into(),
        port: 9000,
    };
    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.port, 9000);
}

async fn test_router() -> Router {
    let db = Database::open_in_memory().unwrap();
    db.run_migrations().await.unwrap();
    WebServer::new(WebConfig::default(), db, SECRET).router()
}

/// A `Cookie` header value carrying a freshly minted session.
fn auth_cookie() -> String {
    let token = SessionCodec::new(SECRET).mint("admin", false).unwrap();
    format!("{COOKIE_NAME}={token}")
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn api_without_cookie_is_unauthorized() {
    let router = test_router().await;
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/links")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Unauthorized");
}

#[tokio::test]
async fn api_with_forged_cookie_is_unauthorized() {
    let router = test_router().await;
    let forged = SessionCodec::new(b"some-other-secret")
        .mint("admin", false)
        .unwrap();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/links")
                .header(header::COOKIE, format!("{COOKIE_NAME}={forged}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_wrong_password_is_forbidden() {
    let router = test_router().await;
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("user=admin&pass=wrong"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("invalid"));
}

#[tokio::test]
async fn login_with_factory_password_sets_session_cookie() {
    let router = test_router().await;
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("user=admin&pass=admin123456"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("linkdeck_session="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn get_links_with_session_returns_seeded_tree() {
    let router = test_router().await;
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/links")
                .header(header::COOKIE, auth_cookie())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["categories"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn short_new_password_maps_to_400() {
    let router = test_router().await;
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/change-password",
            Some(&auth_cookie()),
            serde_json::json!({ "oldPass": "admin123456", "newPass": "short" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("8 characters"));
}

#[tokio::test]
async fn wrong_old_password_maps_to_403() {
    let router = test_router().await;
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/change-password",
            Some(&auth_cookie()),
            serde_json::json!({ "oldPass": "nope", "newPass": "longenough" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["error"], "incorrect password");
}

#[tokio::test]
async fn deleting_unknown_link_maps_to_404() {
    let router = test_router().await;
    let response = router
        .oneshot(json_request(
            "DELETE",
            "/api/links",
            Some(&auth_cookie()),
            serde_json::json!({ "linkId": "ghost" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "not found");
}

#[tokio::test]
async fn create_link_with_invalid_url_maps_to_400() {
    let router = test_router().await;
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/links",
            Some(&auth_cookie()),
            serde_json::json!({ "title": "X", "url": "javascript:alert(1)" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reorder_without_data_maps_to_400() {
    let router = test_router().await;
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/reorder",
            Some(&auth_cookie()),
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("data.categories"));
}

#[tokio::test]
async fn reorder_round_trips_through_the_store() {
    let router = test_router().await;
    let cookie = auth_cookie();

    // Seed one link so the patch has something to order.
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/links",
            Some(&cookie),
            serde_json::json!({ "title": "Mail", "url": "https://mail.example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let cat_id = body["data"]["categories"][0]["id"].as_str().unwrap().to_string();
    let link_id = body["data"]["categories"][0]["links"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/reorder",
            Some(&cookie),
            serde_json::json!({
                "data": { "categories": [{ "id": cat_id, "links": [{ "id": link_id }] }] }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(
        body["data"]["categories"][0]["links"][0]["id"],
        link_id.as_str()
    );
}

#[tokio::test]
async fn server_builds_with_in_memory_database() {
    let db = Database::open_in_memory().unwrap();
    db.run_migrations().await.unwrap();
    let config = WebConfig {
        bind_addr: "127.0.0.1".into(),
        port: 8421,
    };
    let server = WebServer::new(config, db, SECRET);
    assert_eq!(server.addr(), "127.0.0.1:8421");
}
