use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use clap::Parser;
use dawa_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use tempfile::TempDir;

async fn setup(with_assets: bool) -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(&static_dir).unwrap();

    if with_assets {
        std::fs::write(static_dir.join("index.html"), "<h1>دوا پہچان</h1>").unwrap();
        std::fs::write(static_dir.join("manifest.json"), r#"{"name":"Dawa"}"#).unwrap();
        std::fs::write(static_dir.join("sw.js"), "self.skipWaiting();").unwrap();
        std::fs::write(static_dir.join("app.js"), "console.log('ready');").unwrap();
    }

    let args = Args::parse_from([
        "dawa-api",
        "--gemini-api-key",
        "test-key",
        "--gemini-base-url",
        "http://127.0.0.1:9",
        "--upload-dir",
        dir.path().join("uploads").to_str().unwrap(),
        "--static-dir",
        static_dir.to_str().unwrap(),
    ]);

    let app_state = state(Arc::new(args)).await.unwrap();
    let server = TestServer::new(router(app_state).unwrap()).unwrap();
    (server, dir)
}

#[tokio::test]
async fn test_index_is_served() {
    let (server, _dir) = setup(true).await;

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_text("<h1>دوا پہچان</h1>");
    assert_eq!(
        response.header("content-type"),
        "text/html; charset=utf-8"
    );
}

#[tokio::test]
async fn test_manifest_is_json() {
    let (server, _dir) = setup(true).await;

    let response = server.get("/manifest.json").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/json");
    response.assert_json(&serde_json::json!({ "name": "Dawa" }));
}

#[tokio::test]
async fn test_service_worker_may_control_whole_origin() {
    let (server, _dir) = setup(true).await;

    let response = server.get("/sw.js").await;

    response.assert_status_ok();
    assert_eq!(response.header("service-worker-allowed"), "/");
    assert_eq!(response.header("content-type"), "application/javascript");
    response.assert_text("self.skipWaiting();");
}

#[tokio::test]
async fn test_static_directory_is_served() {
    let (server, _dir) = setup(true).await;

    let response = server.get("/static/app.js").await;

    response.assert_status_ok();
    response.assert_text("console.log('ready');");
}

#[tokio::test]
async fn test_missing_assets_are_not_found() {
    let (server, _dir) = setup(false).await;

    for path in ["/", "/manifest.json", "/sw.js", "/static/app.js"] {
        server
            .get(path)
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_openapi_lists_analyze_route() {
    let (server, _dir) = setup(false).await;

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc: serde_json::Value = response.json();
    assert!(doc["paths"]["/api/analyze"]["post"].is_object());
}
