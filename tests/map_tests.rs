// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sweeping route list, map view and export planning tests.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

fn layer<'a>(panel: &'a Value, id: &str) -> &'a Value {
    panel["layers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["id"] == id)
        .unwrap()
}

#[tokio::test]
async fn test_route_list_filters() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    for (uri, expected) in [
        ("/api/sweeping-routes", vec!["Circuit A", "Circuit B"]),
        ("/api/sweeping-routes?shift=all", vec!["Circuit A", "Circuit B"]),
        ("/api/sweeping-routes?shift=matin", vec!["Circuit A"]),
        ("/api/sweeping-routes?shift=soir", vec!["Circuit B"]),
        ("/api/sweeping-routes?q=B", vec!["Circuit B"]),
        ("/api/sweeping-routes?q=fann", vec!["Circuit B"]),
        ("/api/sweeping-routes?shift=matin&q=B", vec![]),
    ] {
        let response = common::send(&app, common::authed("GET", uri, &token, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(names(&common::body_json(response).await), expected, "{uri}");
    }
}

#[tokio::test]
async fn test_route_list_labels() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(
        &app,
        common::authed("GET", "/api/sweeping-routes?shift=matin", &token, None),
    )
    .await;
    let body = common::body_json(response).await;
    let route = &body[0];

    assert_eq!(route["shift"], "matin");
    assert_eq!(route["shift_label"], "Équipe matin");
    assert_eq!(route["length_meters"], 1250.0);
    assert_eq!(route["length_label"], "1.25 km");
    assert_eq!(route["duration_label"], "19 min");
    assert_eq!(route["has_geometry"], true);
}

#[tokio::test]
async fn test_route_list_and_detail_share_field_names() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response =
        common::send(&app, common::authed("GET", "/api/sweeping-routes", &token, None)).await;
    let list = common::body_json(response).await;
    let summary = list
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "1")
        .unwrap()
        .clone();

    let response =
        common::send(&app, common::authed("GET", "/api/sweeping-routes/1", &token, None)).await;
    let detail = common::body_json(response).await;

    for key in ["id", "code", "name", "commune", "shift", "length_meters"] {
        assert_eq!(summary[key], detail[key], "{key}");
        assert!(!detail[key].is_null(), "{key}");
    }
}

#[tokio::test]
async fn test_unknown_shift_is_bad_request() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(
        &app,
        common::authed("GET", "/api/sweeping-routes?shift=nuit", &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_route_detail_and_missing_route() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response =
        common::send(&app, common::authed("GET", "/api/sweeping-routes/2", &token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["name"], "Circuit B");
    assert_eq!(body["geometry"]["type"], "MultiLineString");

    let response =
        common::send(&app, common::authed("GET", "/api/sweeping-routes/99", &token, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::send(
        &app,
        common::authed("POST", "/api/sweeping-routes/99/select", &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_selected_route_is_drawn_once() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(
        &app,
        common::authed("POST", "/api/sweeping-routes/2/select", &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let map = common::body_json(response).await;

    assert_eq!(map["route"]["name"], "Circuit B");
    let polylines = map["route"]["polylines"].as_array().unwrap();
    assert_eq!(polylines.len(), 2);
    assert_eq!(polylines[0]["style"]["color"], "#10B981");
    // Positions are [lat, lon]
    assert_eq!(polylines[0]["positions"][0], json!([14.6921, -17.4645]));

    // The handoff is consumed: a second open draws no route
    let response = common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;
    let map = common::body_json(response).await;
    assert!(map["route"].is_null());
}

#[tokio::test]
async fn test_direct_open_shows_points_without_route() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "1");

    let response = common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let map = common::body_json(response).await;

    assert!(map["route"].is_null());
    assert_eq!(map["markers"].as_array().unwrap().len(), 4);
    assert_eq!(map["center"], json!([14.7167, -17.4677]));
    assert_eq!(map["zoom"], 13);
    assert!(map["base_layer"]["url"]
        .as_str()
        .unwrap()
        .contains("openstreetmap"));

    let centre_ville = map["markers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == "1")
        .unwrap();
    assert_eq!(centre_ville["popup"]["fill"]["color"], "#EF4444");
    assert_eq!(centre_ville["popup"]["fill"]["label"], "75%");
    assert_eq!(centre_ville["popup"]["capacity"], "1000 kg");
}

#[tokio::test]
async fn test_open_respects_overlay_flags() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(
        &app,
        common::authed("POST", "/api/map/open?legend=false&logo=false", &token, None),
    )
    .await;
    let map = common::body_json(response).await;

    assert!(map["overlays"]["legend"].is_null());
    assert_eq!(map["overlays"]["logo"], false);
    assert_eq!(map["overlays"]["north_arrow"], true);
    assert_eq!(map["overlays"]["scale"]["label"], "1.8 km");
}

#[tokio::test]
async fn test_map_requires_open_view() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(&app, common::authed("GET", "/api/map", &token, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::send(
        &app,
        common::authed("POST", "/api/map/layers/1/toggle", &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;
    let response = common::send(&app, common::authed("GET", "/api/map", &token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::send(&app, common::authed("DELETE", "/api/map", &token, None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = common::send(&app, common::authed("GET", "/api/map", &token, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_layer_toggle_hides_markers_and_legend_entry() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");
    common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;

    let response = common::send(
        &app,
        common::authed("POST", "/api/map/layers/1/toggle", &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let panel = common::body_json(response).await;

    assert_eq!(layer(&panel, "1")["visible"], false);
    let legend_ids: Vec<&str> = panel["legend"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["layer_id"].as_str().unwrap())
        .collect();
    assert_eq!(legend_ids, ["2", "3"]);

    let response = common::send(&app, common::authed("GET", "/api/map", &token, None)).await;
    let map = common::body_json(response).await;
    assert!(map["markers"].as_array().unwrap().is_empty());

    // Unknown layer ids change nothing
    let response = common::send(
        &app,
        common::authed("POST", "/api/map/layers/99/toggle", &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let after = common::body_json(response).await;
    assert_eq!(after["layers"], panel["layers"]);
}

#[tokio::test]
async fn test_layer_opacity_is_clamped() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");
    common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;

    let response = common::send(
        &app,
        common::authed(
            "PUT",
            "/api/map/layers/3/opacity",
            &token,
            Some(json!({ "opacity": 1.7 })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let panel = common::body_json(response).await;
    assert_eq!(layer(&panel, "3")["opacity"], 1.0);

    let response = common::send(
        &app,
        common::authed(
            "PUT",
            "/api/map/layers/3/opacity",
            &token,
            Some(json!({ "opacity": 0.25 })),
        ),
    )
    .await;
    let panel = common::body_json(response).await;
    assert_eq!(layer(&panel, "3")["opacity"], 0.25);
}

#[tokio::test]
async fn test_reopen_resets_layers() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;
    common::send(
        &app,
        common::authed("POST", "/api/map/layers/1/toggle", &token, None),
    )
    .await;

    let response = common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;
    let map = common::body_json(response).await;
    assert_eq!(map["markers"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_offline_backend_renders_map_without_markers() {
    let (app, state) = common::create_offline_test_app();
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(&app, common::authed("POST", "/api/map/open", &token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let map = common::body_json(response).await;

    assert!(map["markers"].as_array().unwrap().is_empty());
    assert!(map["base_layer"]["url"].is_string());
    assert_eq!(map["layers"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_export_plan() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    let response = common::send(
        &app,
        common::authed(
            "POST",
            "/api/map/export",
            &token,
            Some(json!({
                "title": "Circuits Dakar",
                "format": "jpg",
                "capture_size": "custom",
                "width": 800,
                "height": 600,
                "dpi": 150,
                "show_logo": false
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let plan = common::body_json(response).await;

    assert_eq!(plan["width"], 800);
    assert_eq!(plan["height"], 600);
    assert_eq!(plan["mime"], "image/jpeg");
    assert_eq!(plan["scale"], 150.0 / 96.0);
    assert_eq!(plan["overlays"]["show_logo"], false);
    assert_eq!(plan["overlays"]["show_legend"], true);
    let file_name = plan["file_name"].as_str().unwrap();
    assert!(file_name.starts_with("Circuits Dakar_"));
    assert!(file_name.ends_with(".jpg"));
}

#[tokio::test]
async fn test_export_rejects_bad_dpi_and_size() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(&state, "2");

    for body in [
        json!({ "dpi": 200 }),
        json!({ "capture_size": "custom", "width": 0, "height": 600 }),
        json!({ "capture_size": "custom" }),
    ] {
        let response = common::send(
            &app,
            common::authed("POST", "/api/map/export", &token, Some(body.clone())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }
}
