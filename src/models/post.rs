//! Post domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

/// Blog post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// 属主，创建后不可变
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post joined with its author's public fields
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub avatar: Option<String>,
}

/// Create post request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(
        custom(function = not_blank, message = "Title is required"),
        length(max = 256, message = "title too long")
    )]
    pub title: String,
    #[validate(custom(function = not_blank, message = "Content is required"))]
    pub content: String,
}

/// Update post request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(
        custom(function = not_blank, message = "Title is required"),
        length(max = 256, message = "title too long")
    )]
    pub title: String,
    #[validate(custom(function = not_blank, message = "Content is required"))]
    pub content: String,
}
