//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{handlers, middleware::AppState};

/// 请求体大小上限（1 MiB，纯 JSON API）
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    let jwt_service = state.jwt_service.clone();

    // 公开端点（健康检查与指标）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_export));

    // 认证路由（无需认证）
    let auth_routes = Router::new()
        .route("/api/v1/auth/signup", post(handlers::auth::signup))
        .route("/api/v1/auth/login", post(handlers::auth::login));

    // 资源路由
    // 读取端点有意公开；同一路径上的写入方法单独叠加认证层
    // （MethodRouter::layer 只包裹已注册的方法，之后添加的 GET 不受影响）
    let resource_routes = Router::new()
        .route(
            "/api/v1/posts",
            post(handlers::post::create_post)
                .layer(axum::middleware::from_fn_with_state(
                    jwt_service.clone(),
                    crate::auth::middleware::jwt_auth_middleware,
                ))
                .get(handlers::post::list_posts),
        )
        .route(
            "/api/v1/posts/{id}",
            put(handlers::post::update_post)
                .delete(handlers::post::delete_post)
                .layer(axum::middleware::from_fn_with_state(
                    jwt_service.clone(),
                    crate::auth::middleware::jwt_auth_middleware,
                ))
                .get(handlers::post::get_post),
        )
        .route(
            "/api/v1/posts/{id}/comments",
            get(handlers::comment::list_post_comments),
        )
        .route(
            "/api/v1/posts/{id}/comments/count",
            get(handlers::comment::count_post_comments),
        )
        .route("/api/v1/comments/count", get(handlers::comment::count_comments))
        .route(
            "/api/v1/users/{id}",
            put(handlers::user::update_profile)
                .layer(axum::middleware::from_fn_with_state(
                    jwt_service.clone(),
                    crate::auth::middleware::jwt_auth_middleware,
                ))
                .get(handlers::user::get_profile),
        );

    // 只存在认证方法的路由
    let authenticated_routes = Router::new()
        .route("/api/v1/auth/me", get(handlers::auth::get_current_user))
        .route("/api/v1/comments", post(handlers::comment::create_comment))
        .route(
            "/api/v1/comments/{id}",
            put(handlers::comment::update_comment).delete(handlers::comment::delete_comment),
        )
        .layer(axum::middleware::from_fn_with_state(
            jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(resource_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}
