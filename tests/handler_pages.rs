mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_index_page() {
    let state = common::create_test_state(common::sqlite_repository().await, None);
    let server = common::create_test_server(state);

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"action="/shortify""#));
    assert!(html.contains("/js/main.js"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let state = common::create_test_state(common::sqlite_repository().await, None);
    let server = common::create_test_server(state);

    server.get("/css/style.css").await.assert_status_ok();
    server.get("/js/main.js").await.assert_status_ok();
    server
        .get("/css/missing.css")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_nested_path_renders_not_found_page() {
    let state = common::create_test_state(common::sqlite_repository().await, Some("short.ly"));
    let server = common::create_test_server(state);

    let response = server.get("/a/b").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Page cannot be found"));
}
