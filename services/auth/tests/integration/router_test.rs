//! Router-level tests for paths that never reach the database: the session gate,
//! logout, request validation, and health.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use signage_auth::domain::clock::Clock;
use signage_auth::infra::mail::{MailSettings, SmtpMailSender};
use signage_auth::infra::password::BcryptHasher;
use signage_auth::router::build_router;
use signage_auth::state::AppState;
use signage_auth_types::cookie::SESSION_TOKEN_EXP;
use signage_testing::auth::MockSession;

use crate::helpers::{TEST_JWT_SECRET, TestClock};

fn test_app(clock: &TestClock, secure_cookies: bool) -> Router {
    let mailer = SmtpMailSender::new(&MailSettings {
        host: "localhost".to_owned(),
        port: 2525,
        secure: false,
        username: "user".to_owned(),
        password: "pass".to_owned(),
        from: "Signage <noreply@example.com>".to_owned(),
        timeout: Duration::from_secs(1),
    })
    .unwrap();

    build_router(AppState {
        db: DatabaseConnection::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        secure_cookies,
        mailer,
        hasher: BcryptHasher { cost: 4 },
        clock: clock.shared(),
        request_timeout: Duration::from_secs(5),
    })
}

fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ── UI gate ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_page_without_cookie_redirects_to_login() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(get("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn nested_admin_page_with_expired_cookie_redirects_to_login() {
    let clock = TestClock::default();
    let session = MockSession::admin(clock.now_secs() - SESSION_TOKEN_EXP);

    let response = test_app(&clock, false)
        .oneshot(
            get("/admin/screens/lobby")
                .header(header::COOKIE, session.cookie_header(TEST_JWT_SECRET))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn admin_page_with_non_admin_role_redirects_to_login() {
    let clock = TestClock::default();
    let session = MockSession::admin(clock.now_secs()).with_role("editor");

    let response = test_app(&clock, false)
        .oneshot(
            get("/admin")
                .header(header::COOKIE, session.cookie_header(TEST_JWT_SECRET))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn admin_root_with_trailing_slash_goes_through_the_gate() {
    let clock = TestClock::default();
    let app = test_app(&clock, false);

    let response = app
        .clone()
        .oneshot(get("/admin/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let session = MockSession::admin(clock.now_secs());
    let response = app
        .oneshot(
            get("/admin/")
                .header(header::COOKIE, session.cookie_header(TEST_JWT_SECRET))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_page_with_valid_cookie_renders() {
    let clock = TestClock::default();
    let session = MockSession::admin(clock.now_secs());

    let response = test_app(&clock, false)
        .oneshot(
            get("/admin")
                .header(header::COOKIE, session.cookie_header(TEST_JWT_SECRET))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("admin@example.com"));
}

#[tokio::test]
async fn login_page_is_public() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(get("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ── API gate ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_api_without_cookie_is_401_json() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(get("/api/session").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "UNAUTHENTICATED");
    assert_eq!(body["error"], "Not authenticated");
}

#[tokio::test]
async fn session_api_with_non_admin_role_is_403_json() {
    let clock = TestClock::default();
    let session = MockSession::admin(clock.now_secs()).with_role("editor");

    let response = test_app(&clock, false)
        .oneshot(
            get("/api/session")
                .header(header::COOKIE, session.cookie_header(TEST_JWT_SECRET))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn session_api_with_valid_cookie_returns_claims() {
    let clock = TestClock::default();
    let session = MockSession::admin(clock.now_secs());

    let response = test_app(&clock, false)
        .oneshot(
            get("/api/session")
                .header(header::COOKIE, session.cookie_header(TEST_JWT_SECRET))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], session.admin_id.to_string());
    assert_eq!(body["email"], "admin@example.com");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["exp"], clock.now_secs() + SESSION_TOKEN_EXP);
}

#[tokio::test]
async fn change_password_without_cookie_is_401() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(post_json(
            "/api/change-password",
            r#"{"currentPassword":"a","newPassword":"b"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ── Public API ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let clock = TestClock::default();
    let response = test_app(&clock, true)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_owned();
    assert!(cookie.starts_with("token=;"), "{cookie}");
    assert!(cookie.contains("Max-Age=0"), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");
    assert!(cookie.contains("Secure"), "{cookie}");
    assert_eq!(json_body(response).await["message"], "Logged out");
}

#[tokio::test]
async fn forgot_password_with_malformed_email_is_400() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(post_json("/api/forgot-password", r#"{"email":"not-an-email"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "INVALID_INPUT");
    assert_eq!(body["error"], "Please enter a valid email address");
}

#[tokio::test]
async fn reset_password_with_missing_fields_is_400() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(post_json("/api/reset-password", r#"{"email":"a@b.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Email, OTP, and new password are required"
    );
}

#[tokio::test]
async fn malformed_json_is_400_invalid_input() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(post_json("/api/login", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["kind"], "INVALID_INPUT");
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn healthz_is_200_and_echoes_a_request_id() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn readyz_is_503_when_database_is_unreachable() {
    let clock = TestClock::default();
    let response = test_app(&clock, false)
        .oneshot(get("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["kind"], "UNAVAILABLE");
}
