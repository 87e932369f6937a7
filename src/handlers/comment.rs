//! 评论管理的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    auth::ownership,
    error::AppError,
    middleware::AppState,
    models::comment::*,
    repository::{CommentRepository, PostRepository},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 列出某文章下的评论（公开）
pub async fn list_post_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    let comments = repo.list_by_post(&post_id).await?;

    Ok(Json(comments))
}

/// 全站评论总数（公开）
pub async fn count_comments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    let count = repo.count_all().await?;

    Ok(Json(CommentCountResponse { count }))
}

/// 某文章的评论数（公开）
pub async fn count_post_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    let count = repo.count_by_post(&post_id).await?;

    Ok(Json(CommentCountResponse { count }))
}

/// 创建评论（需要认证，目标文章必须存在）
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(|e| AppError::validation(&e))?;

    // 目标文章必须存在
    let post_repo = PostRepository::new(state.db.clone());
    post_repo
        .find_by_id(&req.post_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let repo = CommentRepository::new(state.db.clone());
    let comment = repo
        .create(req.content.trim(), req.post_id, auth_context.user_id)
        .await?;

    tracing::info!(
        comment_id = %comment.id,
        post_id = %comment.post_id,
        author_id = %comment.author_id,
        "Comment created"
    );

    let comment = repo
        .find_by_id_with_author(&comment.id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// 更新评论（仅属主）
///
/// 检查顺序：认证（中间件）→ 存在性 → 属主
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(|e| AppError::validation(&e))?;

    let repo = CommentRepository::new(state.db.clone());
    let comment = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;

    ownership::require_owner(comment.author_id, auth_context.user_id)?;

    repo.update(id, req.content.trim())
        .await?
        .ok_or(AppError::NotFound)?;

    let updated = repo
        .find_by_id_with_author(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}

/// 删除评论（仅属主）
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    let comment = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;

    ownership::require_owner(comment.author_id, auth_context.user_id)?;

    repo.delete(id).await?;

    tracing::info!(comment_id = %id, "Comment deleted");

    Ok(Json(json!({
        "message": "Comment deleted successfully"
    })))
}
