//! Post repository (数据库访问层)

use crate::{error::AppError, models::post::*};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostRepository {
    db: PgPool,
}

impl PostRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 创建文章
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        author_id: Uuid,
    ) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(&self.db)
        .await?;

        Ok(post)
    }

    /// 根据 ID 查找文章（不带作者信息，用于属主检查）
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(post)
    }

    /// 根据 ID 查找文章，联接作者的公开字段
    pub async fn find_by_id_with_author(&self, id: &Uuid) -> Result<Option<PostResponse>, AppError> {
        let post = sqlx::query_as::<_, PostResponse>(
            r#"
            SELECT p.*, u.username, u.avatar
            FROM posts p
            JOIN users u ON p.author_id = u.id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(post)
    }

    /// 列出所有文章（最新在前）
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PostResponse>, AppError> {
        let posts = sqlx::query_as::<_, PostResponse>(
            r#"
            SELECT p.*, u.username, u.avatar
            FROM posts p
            JOIN users u ON p.author_id = u.id
            ORDER BY p.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    /// 列出某作者的所有文章（最新在前）
    pub async fn list_by_author(&self, author_id: &Uuid) -> Result<Vec<PostResponse>, AppError> {
        let posts = sqlx::query_as::<_, PostResponse>(
            r#"
            SELECT p.*, u.username, u.avatar
            FROM posts p
            JOIN users u ON p.author_id = u.id
            WHERE p.author_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    /// 更新文章（属主字段 author_id 不可变）
    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $2, content = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.db)
        .await?;

        Ok(post)
    }

    /// 删除文章
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
