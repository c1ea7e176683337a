//! Endpoint tests for the token login endpoint: generic validation errors
//! and per-IP rate limiting.

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{json_request, response_json, test_app};

/// Sends a login request attributed to `ip` via X-Forwarded-For.
async fn login_from(app: &axum::Router, ip: &str, body: Value) -> (StatusCode, Value) {
    let mut request = json_request(Method::POST, "/api/v1/auth/login", body);
    request
        .headers_mut()
        .insert("x-forwarded-for", ip.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

fn malformed_bodies() -> Vec<Value> {
    vec![
        // missing fields
        json!({}),
        json!({ "identifier": "a@b.c" }),
        json!({ "identifier": "a@b.c", "secret": "pw" }),
        // empty strings
        json!({ "identifier": "", "secret": "pw", "client_type": "web" }),
        json!({ "identifier": "a@b.c", "secret": "", "client_type": "web" }),
        // wrong types
        json!({ "identifier": 42, "secret": "pw", "client_type": "web" }),
        json!({ "identifier": "a@b.c", "secret": ["pw"], "client_type": "web" }),
        // unknown client type
        json!({ "identifier": "a@b.c", "secret": "pw", "client_type": "desktop" }),
        json!({ "identifier": "a@b.c", "secret": "pw", "client_type": "WEB" }),
    ]
}

#[tokio::test]
async fn test_every_validation_failure_collapses_to_generic_401() {
    let app = test_app();
    // distinct IPs so the rate limiter never interferes
    for (index, body) in malformed_bodies().into_iter().enumerate() {
        let ip = format!("198.51.100.{index}");
        let (status, response) = login_from(&app, &ip, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "case {index}");
        assert_eq!(response["error"], "invalid_credentials", "case {index}");
        // the body must not say which field failed
        let raw = response.to_string();
        assert!(!raw.contains("identifier"), "case {index} leaks field names");
        assert!(!raw.contains("client_type"), "case {index} leaks field names");
    }
}

#[tokio::test]
async fn test_sixth_request_in_window_is_rate_limited() {
    let app = test_app();
    let body = json!({ "identifier": "", "secret": "", "client_type": "nope" });

    for attempt in 1..=5 {
        let (status, _) = login_from(&app, "203.0.113.50", body.clone()).await;
        assert_eq!(
            status,
            StatusCode::UNAUTHORIZED,
            "attempt {attempt} should pass the limiter"
        );
    }

    let (status, response) = login_from(&app, "203.0.113.50", body.clone()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response["error"], "rate_limited");
    assert_eq!(response["retry_after"], 60);
}

#[tokio::test]
async fn test_rate_limit_is_per_ip() {
    let app = test_app();
    let body = json!({ "identifier": "", "secret": "", "client_type": "nope" });

    for _ in 0..6 {
        login_from(&app, "203.0.113.60", body.clone()).await;
    }
    let (limited, _) = login_from(&app, "203.0.113.60", body.clone()).await;
    assert_eq!(limited, StatusCode::TOO_MANY_REQUESTS);

    // a different client is unaffected
    let (status, _) = login_from(&app, "203.0.113.61", body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_undeterminable_ip_fails_closed() {
    let app = test_app();
    // no X-Forwarded-For and no peer address in this harness
    let request = json_request(
        Method::POST,
        "/api/v1/auth/login",
        json!({ "identifier": "a@b.c", "secret": "pw", "client_type": "web" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = response_json(response).await;
    assert_eq!(body["error"], "rate_limited");
    assert_eq!(body["retry_after"], 60);
}

#[tokio::test]
async fn test_rate_limited_response_has_retry_after_header() {
    let app = test_app();
    let body = json!({ "identifier": "", "secret": "", "client_type": "nope" });
    for _ in 0..5 {
        login_from(&app, "203.0.113.70", body.clone()).await;
    }

    let mut request = json_request(Method::POST, "/api/v1/auth/login", body);
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.70".parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "60");
}
