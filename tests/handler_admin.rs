mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use shortify::domain::entities::NewLink;

async fn server_with_links(urls: &[(&str, &str)]) -> TestServer {
    let repo = common::sqlite_repository().await;
    for (original_url, short_url) in urls {
        repo.create(NewLink {
            original_url: original_url.to_string(),
            short_url: short_url.to_string(),
        })
        .await
        .unwrap();
    }

    common::create_test_server(common::create_test_state(repo, Some("short.ly")))
}

#[tokio::test]
async fn test_admin_requires_credentials() {
    let server = server_with_links(&[]).await;

    let response = server.get("/admin").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let challenge = response.header("www-authenticate");
    assert!(challenge.to_str().unwrap().starts_with("Basic realm="));
}

#[tokio::test]
async fn test_admin_rejects_wrong_password() {
    let server = server_with_links(&[]).await;

    let response = server
        .get("/admin")
        .add_header("Authorization", common::basic_auth(common::ADMIN_USER, "wrong"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_page_lists_links() {
    let server = server_with_links(&[
        ("https://example.com/one", "http://short.ly/One"),
        ("https://example.com/two", "http://short.ly/Two"),
    ])
    .await;

    let response = server
        .get("/admin")
        .add_header("Authorization", common::admin_auth())
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("https://example.com/one"));
    assert!(html.contains("http://short.ly/Two"));
}

#[tokio::test]
async fn test_admin_delete_redirects_back() {
    let server = server_with_links(&[("https://example.com/del", "http://short.ly/Del")]).await;

    let response = server
        .post("/admin/delete")
        .add_header("Authorization", common::admin_auth())
        .form(&json!({ "id": "1" }))
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "/admin");

    server.get("/Del").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_delete_missing_id() {
    let server = server_with_links(&[]).await;

    let response = server
        .post("/admin/delete")
        .add_header("Authorization", common::admin_auth())
        .form(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["message"], "Missing id");
}

#[tokio::test]
async fn test_admin_delete_invalid_id() {
    let server = server_with_links(&[]).await;

    let response = server
        .post("/admin/delete")
        .add_header("Authorization", common::admin_auth())
        .form(&json!({ "id": "abc" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["message"], "Invalid id");
}

#[tokio::test]
async fn test_admin_delete_unknown_id() {
    let server = server_with_links(&[]).await;

    let response = server
        .post("/admin/delete")
        .add_header("Authorization", common::admin_auth())
        .form(&json!({ "id": "999" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_list_links() {
    let server = server_with_links(&[
        ("https://example.com/a", "http://short.ly/Aaa"),
        ("https://example.com/b", "http://short.ly/Bbb"),
    ])
    .await;

    let response = server
        .get("/api/links")
        .add_header("Authorization", common::admin_auth())
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["original_url"], "https://example.com/a");
    assert_eq!(items[1]["short_url"], "http://short.ly/Bbb");
    assert!(items[0]["id"].is_i64());
    assert!(items[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_api_links_requires_credentials() {
    let server = server_with_links(&[]).await;

    server
        .get("/api/links")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_delete_link() {
    let server = server_with_links(&[("https://example.com/x", "http://short.ly/Xxx")]).await;

    server
        .delete("/api/links/1")
        .add_header("Authorization", common::admin_auth())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete("/api/links/1")
        .add_header("Authorization", common::admin_auth())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_page_never_links_non_http_urls() {
    let server = server_with_links(&[
        ("javascript:alert(1)", "http://short.ly/Jsx"),
        ("https://example.com/safe", "http://short.ly/Saf"),
    ])
    .await;

    let response = server
        .get("/admin")
        .add_header("Authorization", common::admin_auth())
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("javascript:alert(1)"));
    assert!(!html.contains(r#"href="javascript:"#));
    assert!(html.contains(r#"href="https://example.com/safe""#));
}
