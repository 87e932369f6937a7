//! Comment domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

/// Comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    /// 所属文章，创建后不可变
    pub post_id: Uuid,
    /// 属主，创建后不可变
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with its author's public fields
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub avatar: Option<String>,
}

/// Create comment request (post_id carried in the body)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(custom(function = not_blank, message = "Comment content is required"))]
    pub content: String,
    pub post_id: Uuid,
}

/// Update comment request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(custom(function = not_blank, message = "Comment content is required"))]
    pub content: String,
}

/// Comment count response
#[derive(Debug, Serialize)]
pub struct CommentCountResponse {
    pub count: i64,
}
