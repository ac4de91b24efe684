// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, logout, session cookie and navigation guard tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use serde_json::json;

mod common;

const INVALID_CREDENTIALS: &str = "Identifiants incorrects ou rôle non autorisé";

fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

fn login_request(username: &str, password: &str, role: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": username, "password": password, "role": role }).to_string(),
        ))
        .unwrap()
}

fn page_request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (app, _) = common::create_test_app().await;

    let response = common::send(&app, login_request("admin", "admin123", "admin")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = find_cookie(&set_cookie_headers(&response), "geoportail_session");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("Secure"));

    let body = common::body_json(response).await;
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_rejects_any_wrong_field() {
    let (app, _) = common::create_test_app().await;

    for (username, password, role) in [
        ("inconnu", "admin123", "admin"),
        ("admin", "mauvais", "admin"),
        ("admin", "admin123", "geomaticien"),
        ("geomaticien", "geo123", "admin"),
    ] {
        let response = common::send(&app, login_request(username, password, role)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{username}/{role}");
        assert!(set_cookie_headers(&response).is_empty());

        let body = common::body_json(response).await;
        assert_eq!(body["error"], "invalid_credentials");
        assert_eq!(body["details"], INVALID_CREDENTIALS);
    }
}

#[tokio::test]
async fn test_api_requires_session() {
    let (app, _) = common::create_test_app().await;

    let response = common::send(&app, page_request("/api/me", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::send(&app, common::authed("GET", "/api/me", "not.a.jwt", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_removed_account_is_anonymous() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(&app, common::authed("GET", "/api/me", &token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    state.identities.remove("2");
    let response = common::send(&app, common::authed("GET", "/api/me", &token, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_lists_permissions() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(&app, common::authed("GET", "/api/me", &token, None)).await;
    let body = common::body_json(response).await;

    assert_eq!(body["user"]["username"], "geomaticien");
    let granted: Vec<&str> = body["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["granted"] == true)
        .map(|p| p["permission"].as_str().unwrap())
        .collect();
    assert!(granted.contains(&"edit_geodata"));
    assert!(!granted.contains(&"manage_users"));
}

#[tokio::test]
async fn test_protected_page_redirects_anonymous_to_login() {
    let (app, _) = common::create_test_app().await;

    for cookie in [None, Some("geoportail_session=corrupt{not-json")] {
        let response = common::send(&app, page_request("/map", cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn test_trailing_slash_pages_are_guarded() {
    let (app, state) = common::create_test_app().await;

    let response = common::send(&app, page_request("/map/", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookie = format!("geoportail_session={}", common::create_test_jwt(&state, "1"));
    let response = common::send(&app, page_request("/login/", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = common::send(&app, page_request("/profile/", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_page_redirects_signed_in_user_home() {
    let (app, state) = common::create_test_app().await;
    let cookie = format!("geoportail_session={}", common::create_test_jwt(&state, "1"));

    let response = common::send(&app, page_request("/login", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = common::send(&app, page_request("/sweeping", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let csp = response
        .headers()
        .get(header::CONTENT_SECURITY_POLICY)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(csp.contains("tile.openstreetmap.org"));
}

#[tokio::test]
async fn test_login_page_is_public() {
    let (app, _) = common::create_test_app().await;
    let response = common::send(&app, page_request("/login", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_cookie_removal_attributes() {
    let (app, state) = common::create_test_app().await;
    let cookie = format!("geoportail_session={}", common::create_test_jwt(&state, "1"));

    let response = common::send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let removal = find_cookie(&set_cookie_headers(&response), "geoportail_session");
    assert!(removal.contains("Path=/"));
    assert!(removal.contains("HttpOnly"));
    assert!(removal.contains("SameSite=Lax"));
    assert!(removal.contains("Max-Age=0"));
    assert!(!removal.contains("Secure"));
}

#[tokio::test]
async fn test_logout_cookie_is_secure_for_https_frontend() {
    let (app, state) = common::create_test_app_with_frontend_url("https://geoportail.sonaged.sn").await;
    let cookie = format!("geoportail_session={}", common::create_test_jwt(&state, "1"));

    let response = common::send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    let removal = find_cookie(&set_cookie_headers(&response), "geoportail_session");
    assert!(removal.contains("Secure"));
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_closes_map_view() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.map_sessions.is_open("2"));

    let response = common::send(&app, common::authed("POST", "/auth/logout", &token, None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!state.map_sessions.is_open("2"));
}
