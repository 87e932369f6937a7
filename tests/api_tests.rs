//! API 集成测试
//!
//! 依赖运行中的 PostgreSQL（通过 TEST_DATABASE_URL 指定），
//! 因此默认 ignore，本地运行: cargo test -- --ignored

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{create_test_app_state, create_test_user, issue_test_token, setup_test_db};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_signup_login_and_me() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = blog_service::routes::create_router(state);

    // 注册
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/signup",
            None,
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "Password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"]["password_hash"].is_null());

    // 登录
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({
                "email": "alice@example.com",
                "password": "Password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    // 当前用户
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_signup_duplicate_email_conflict() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_user(&pool, "alice", "alice@example.com", "Password123")
        .await
        .expect("Failed to create test user");

    let state = create_test_app_state(pool.clone()).await;
    let app = blog_service::routes::create_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/signup",
            None,
            json!({
                "username": "alice2",
                "email": "alice@example.com",
                "password": "Password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    // 不应创建任何新记录
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_login_wrong_password() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_user(&pool, "alice", "alice@example.com", "Password123")
        .await
        .expect("Failed to create test user");

    let state = create_test_app_state(pool).await;
    let app = blog_service::routes::create_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({
                "email": "alice@example.com",
                "password": "WrongPassword"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_post_update_requires_ownership() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let alice = create_test_user(&pool, "alice", "alice@example.com", "Password123")
        .await
        .unwrap();
    let bob = create_test_user(&pool, "bob", "bob@example.com", "Password123")
        .await
        .unwrap();

    let state = create_test_app_state(pool).await;
    let alice_token = issue_test_token(&state, &alice, "alice");
    let bob_token = issue_test_token(&state, &bob, "bob");
    let app = blog_service::routes::create_router(state);

    // alice 创建文章
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&alice_token),
            json!({"title": "Hello", "content": "World"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let post = body_json(response).await;
    let post_id = post["id"].as_str().unwrap().to_string();

    // bob 尝试更新 → 403
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/posts/{}", post_id),
            Some(&bob_token),
            json!({"title": "Hacked", "content": "Pwned"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // alice 更新自己的文章 → 200，内容持久化
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/posts/{}", post_id),
            Some(&alice_token),
            json!({"title": "Updated", "content": "Content"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/posts/{}", post_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Updated");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_unauthenticated_delete_comment_is_401_regardless_of_existence() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = blog_service::routes::create_router(state);

    // 评论并不存在，但认证检查必须先于存在性检查
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/comments/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_comment_on_missing_post_is_404() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let alice = create_test_user(&pool, "alice", "alice@example.com", "Password123")
        .await
        .unwrap();

    let state = create_test_app_state(pool).await;
    let token = issue_test_token(&state, &alice, "alice");
    let app = blog_service::routes::create_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/comments",
            Some(&token),
            json!({
                "content": "First!",
                "post_id": uuid::Uuid::new_v4()
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_profile_update_only_by_owner() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let alice = create_test_user(&pool, "alice", "alice@example.com", "Password123")
        .await
        .unwrap();
    let bob = create_test_user(&pool, "bob", "bob@example.com", "Password123")
        .await
        .unwrap();

    let state = create_test_app_state(pool).await;
    let bob_token = issue_test_token(&state, &bob, "bob");
    let alice_token = issue_test_token(&state, &alice, "alice");
    let app = blog_service::routes::create_router(state);

    // bob 尝试修改 alice 的资料 → 403
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/users/{}", alice),
            Some(&bob_token),
            json!({"bio": "not yours"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // alice 修改自己的资料 → 200
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/users/{}", alice),
            Some(&alice_token),
            json!({"bio": "rustacean"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["bio"], "rustacean");

    // 公开资料无需认证即可读取
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/users/{}", alice))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["bio"], "rustacean");
    assert!(body["posts"].is_array());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_blank_title_is_validation_error() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let alice = create_test_user(&pool, "alice", "alice@example.com", "Password123")
        .await
        .unwrap();

    let state = create_test_app_state(pool).await;
    let token = issue_test_token(&state, &alice, "alice");
    let app = blog_service::routes::create_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            json!({"title": "   ", "content": "body"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
