//! 文章管理的 HTTP 处理器
//! 读取端点公开，写入端点要求认证且仅属主可改

use crate::{
    auth::middleware::AuthContext,
    auth::ownership,
    error::AppError,
    middleware::AppState,
    models::post::*,
    repository::PostRepository,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 列表查询参数
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 列出文章（公开）
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    let repo = PostRepository::new(state.db.clone());
    let posts = repo.list(limit, offset).await?;

    Ok(Json(posts))
}

/// 获取单篇文章（公开）
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PostRepository::new(state.db.clone());
    let post = repo
        .find_by_id_with_author(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(post))
}

/// 创建文章（需要认证）
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(|e| AppError::validation(&e))?;

    let repo = PostRepository::new(state.db.clone());
    let post = repo
        .create(req.title.trim(), req.content.trim(), auth_context.user_id)
        .await?;

    tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");

    let post = repo
        .find_by_id_with_author(&post.id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// 更新文章（仅属主）
///
/// 检查顺序：认证（中间件）→ 存在性 → 属主
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(|e| AppError::validation(&e))?;

    let repo = PostRepository::new(state.db.clone());
    let post = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;

    ownership::require_owner(post.author_id, auth_context.user_id)?;

    repo.update(id, req.title.trim(), req.content.trim())
        .await?
        .ok_or(AppError::NotFound)?;

    let updated = repo
        .find_by_id_with_author(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}

/// 删除文章（仅属主）
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PostRepository::new(state.db.clone());
    let post = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;

    ownership::require_owner(post.author_id, auth_context.user_id)?;

    repo.delete(id).await?;

    tracing::info!(post_id = %id, "Post deleted");

    Ok(Json(json!({
        "message": "Post deleted successfully"
    })))
}
