//! 用户资料的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    auth::ownership,
    error::AppError,
    middleware::AppState,
    models::user::*,
    repository::{PostRepository, UserRepository},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 获取用户公开资料及其文章（公开）
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;

    let post_repo = PostRepository::new(state.db.clone());
    let posts = post_repo.list_by_author(&id).await?;

    Ok(Json(UserProfileResponse {
        user: UserResponse::from(user),
        posts,
    }))
}

/// 更新用户资料（仅本人，bio/avatar）
///
/// 属主检查直接比较路径 ID 与调用者 ID，
/// 资料的属主就是用户自身，无需先加载记录
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    ownership::require_owner(id, auth_context.user_id)?;

    req.validate().map_err(|e| AppError::validation(&e))?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .update_profile(id, &req)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(user_id = %id, "Profile updated");

    Ok(Json(UserResponse::from(user)))
}
