//! Integration tests for API endpoints.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; the
//! services are real, the repositories are in-memory.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::TestApp;
use tourweb::domain::{Article, NewArticle, User};
use tourweb::infra::{ArticleRepository, UserRepository};

// =============================================================================
// Helpers
// =============================================================================

const BOUNDARY: &str = "tourweb-test-boundary";

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn multipart_upload(field: &str, file_name: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/user/icon/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn stored_article(id: i64, account: &str) -> Article {
    let mut article = Article::publish(
        NewArticle {
            title: format!("Trip {}", id),
            content: "Rice terraces".to_string(),
            user_account: account.to_string(),
            img_path: None,
            is_foreign: false,
        },
        Utc::now(),
    );
    article.id = id;
    article
}

// =============================================================================
// Registration & Login
// =============================================================================

#[tokio::test]
async fn test_register_then_duplicate() {
    let app = TestApp::new();

    let (status, body) = send(
        &app,
        post_json("/api/user/reg", json!({"account": "alice", "password": "pw1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);

    let (status, body) = send(
        &app,
        post_json("/api/user/reg", json!({"account": "alice", "password": "other"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "账号已存在");

    // First registration is untouched
    assert_eq!(app.users.get("alice").unwrap().password, "pw1");
}

#[tokio::test]
async fn test_register_missing_field_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = send(&app, post_json("/api/user/reg", json!({"account": "alice"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4);
    assert!(app.users.get("alice").is_none());
}

#[tokio::test]
async fn test_login_outcomes() {
    let app = TestApp::new();
    app.users.save(&User::new("alice", "secret")).await.unwrap();

    let (_, ok) = send(
        &app,
        post_json("/api/user/login", json!({"account": "alice", "password": "secret"})),
    )
    .await;
    assert_eq!(ok["code"], 0);

    let (status, wrong) = send(
        &app,
        post_json("/api/user/login", json!({"account": "alice", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wrong["code"], 2);
    assert_eq!(wrong["message"], "密码不正确");

    let (_, unknown) = send(
        &app,
        post_json("/api/user/login", json!({"account": "bob", "password": "secret"})),
    )
    .await;
    assert_eq!(unknown["code"], 1);
    assert_eq!(unknown["message"], "账号不存在");
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_info_hides_password() {
    let app = TestApp::new();
    app.users.save(&User::new("alice", "secret")).await.unwrap();

    let (status, body) = send(&app, get("/api/user/info/alice")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["account"], "alice");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_info_unknown_account() {
    let app = TestApp::new();

    let (_, body) = send(&app, get("/api/user/info/ghost")).await;

    assert_eq!(body["code"], 1);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_update_icon_and_password() {
    let app = TestApp::new();
    app.users.save(&User::new("alice", "secret")).await.unwrap();

    let (_, body) = send(
        &app,
        post_json("/api/user/icon/update/alice", json!({"iconPath": "upload/x.png"})),
    )
    .await;
    assert_eq!(body["code"], 0);

    let (_, body) = send(
        &app,
        post_json("/api/user/password/alice", json!({"password": "fresh"})),
    )
    .await;
    assert_eq!(body["code"], 0);

    let user = app.users.get("alice").unwrap();
    assert_eq!(user.icon_path.as_deref(), Some("upload/x.png"));
    assert_eq!(user.password, "fresh");
}

#[tokio::test]
async fn test_update_icon_requires_path() {
    let app = TestApp::new();

    let (status, _) = send(
        &app,
        post_json("/api/user/icon/update/alice", json!({"iconPath": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_change_password_unknown_account() {
    let app = TestApp::new();

    let (_, body) = send(
        &app,
        post_json("/api/user/password/ghost", json!({"password": "fresh"})),
    )
    .await;

    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "账号不存在");
}

// =============================================================================
// Icon Upload
// =============================================================================

#[tokio::test]
async fn test_upload_rejects_exe() {
    let app = TestApp::new();

    let (status, body) = send(&app, multipart_upload("file", "setup.exe", b"MZ")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 3);
    assert_eq!(body["message"], "不允许上传该格式的文件");
}

#[tokio::test]
async fn test_upload_accepts_any_case_and_serves_file() {
    let app = TestApp::new();

    for (name, ext) in [("a.JPG", "jpg"), ("b.Png", "png"), ("c.gif", "gif"), ("d.BMP", "bmp")] {
        let (_, body) = send(&app, multipart_upload("file", name, b"image-bytes")).await;
        assert_eq!(body["code"], 0, "upload of {} failed", name);

        let path = body["data"].as_str().unwrap().to_string();
        assert!(path.starts_with("upload/"));
        assert!(path.ends_with(&format!(".{}", ext)));

        let response = app
            .router
            .clone()
            .oneshot(get(&format!("/{}", path)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let served = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&served[..], b"image-bytes");
    }
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = TestApp::new();

    let (status, body) = send(&app, multipart_upload("avatar", "a.png", b"x")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "上传文件异常");
}

#[tokio::test]
async fn test_upload_requires_multipart() {
    let app = TestApp::new();

    let (status, _) = send(&app, post_json("/api/user/icon/upload", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Articles & Comments
// =============================================================================

#[tokio::test]
async fn test_add_article_trims_and_indexes() {
    let app = TestApp::new();

    let (status, body) = send(
        &app,
        post_json(
            "/api/user/article",
            json!({"title": "  Trip  ", "content": "Day one", "userAccount": "alice"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["title"], "Trip");
    assert_eq!(body["data"]["clickCount"], 1);
    assert_eq!(body["data"]["commentCount"], 0);

    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(app.articles.get(id).unwrap().title, "Trip");
    assert_eq!(app.articles.indexed("alice"), vec![id]);
}

#[tokio::test]
async fn test_add_article_missing_content() {
    let app = TestApp::new();

    let (status, _) = send(
        &app,
        post_json("/api/user/article", json!({"title": "Trip", "userAccount": "alice"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_article_missing_and_malformed_id() {
    let app = TestApp::new();

    let (status, body) = send(&app, get("/api/user/article/12345")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "文章不存在");

    let (status, _) = send(&app, get("/api/user/article/not-a-number")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_article_counts_clicks() {
    let app = TestApp::new();
    app.articles.save(&stored_article(100, "alice")).await.unwrap();

    send(&app, get("/api/user/article/100")).await;
    let (_, body) = send(&app, get("/api/user/article/100")).await;

    assert_eq!(body["data"]["clickCount"], 3);
}

#[tokio::test]
async fn test_list_articles_is_bare_array() {
    let app = TestApp::new();
    for id in [1, 2, 3] {
        app.articles.save(&stored_article(id, "alice")).await.unwrap();
    }

    let (status, body) = send(&app, get("/api/user/articles")).await;

    assert_eq!(status, StatusCode::OK);
    let mut ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_list_user_articles_newest_first() {
    let app = TestApp::new();
    for id in [10, 30, 20] {
        app.articles.save(&stored_article(id, "alice")).await.unwrap();
        app.articles.index_for_user("alice", id).await.unwrap();
    }
    app.articles.save(&stored_article(40, "bob")).await.unwrap();
    app.articles.index_for_user("bob", 40).await.unwrap();

    let (_, body) = send(&app, get("/api/user/articles/alice")).await;

    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![30, 20, 10]);
}

#[tokio::test]
async fn test_comment_flow() {
    let app = TestApp::new();
    app.articles.save(&stored_article(7, "alice")).await.unwrap();

    let (_, body) = send(
        &app,
        post_json(
            "/api/user/comment/7",
            json!({"content": "Lovely", "userAccount": "bob", "articleId": 7}),
        ),
    )
    .await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["articleId"], 7);

    send(
        &app,
        post_json(
            "/api/user/comment/7",
            json!({"content": "Agreed", "userAccount": "carol", "articleId": 7}),
        ),
    )
    .await;

    let (_, body) = send(&app, get("/api/user/comments/7")).await;
    let contents: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["Lovely", "Agreed"]);
    assert_eq!(app.articles.get(7).unwrap().comment_count, 2);
}

#[tokio::test]
async fn test_comment_validation() {
    let app = TestApp::new();
    app.articles.save(&stored_article(7, "alice")).await.unwrap();

    let (status, _) = send(
        &app,
        post_json(
            "/api/user/comment/7",
            json!({"content": "", "userAccount": "bob", "articleId": 7}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        post_json(
            "/api/user/comment/7",
            json!({"content": "Hi", "userAccount": "bob", "articleId": 8}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_without_article_id_is_rejected() {
    let app = TestApp::new();
    app.articles.save(&stored_article(7, "alice")).await.unwrap();

    let (status, body) = send(
        &app,
        post_json("/api/user/comment/7", json!({"content": "Hi", "userAccount": "bob"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4);
    assert_eq!(app.articles.get(7).unwrap().comment_count, 0);
}

#[tokio::test]
async fn test_comment_on_missing_article() {
    let app = TestApp::new();

    let (status, body) = send(
        &app,
        post_json(
            "/api/user/comment/99",
            json!({"content": "Hi", "userAccount": "bob", "articleId": 99}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "文章不存在");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_store_state() {
    let (status, body) = send(&TestApp::new(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"]["redis"]["status"], "healthy");

    let (status, body) = send(&TestApp::with_health(false), get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}
