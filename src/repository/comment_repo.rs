//! Comment repository (数据库访问层)

use crate::{error::AppError, models::comment::*};
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct CommentRepository {
    db: PgPool,
}

impl CommentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 创建评论
    pub async fn create(
        &self,
        content: &str,
        post_id: Uuid,
        author_id: Uuid,
    ) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, post_id, author_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(content)
        .bind(post_id)
        .bind(author_id)
        .fetch_one(&self.db)
        .await?;

        Ok(comment)
    }

    /// 根据 ID 查找评论（不带作者信息，用于属主检查）
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(comment)
    }

    /// 根据 ID 查找评论，联接作者的公开字段
    pub async fn find_by_id_with_author(
        &self,
        id: &Uuid,
    ) -> Result<Option<CommentResponse>, AppError> {
        let comment = sqlx::query_as::<_, CommentResponse>(
            r#"
            SELECT c.*, u.username, u.avatar
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(comment)
    }

    /// 列出某文章下的所有评论（最早在前）
    pub async fn list_by_post(&self, post_id: &Uuid) -> Result<Vec<CommentResponse>, AppError> {
        let comments = sqlx::query_as::<_, CommentResponse>(
            r#"
            SELECT c.*, u.username, u.avatar
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.db)
        .await?;

        Ok(comments)
    }

    /// 统计全部评论数量
    pub async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.db)
            .await?
            .get(0);

        Ok(count)
    }

    /// 统计某文章的评论数量
    pub async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.db)
            .await?
            .get(0);

        Ok(count)
    }

    /// 更新评论（post_id 与 author_id 不可变）
    pub async fn update(&self, id: Uuid, content: &str) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.db)
        .await?;

        Ok(comment)
    }

    /// 删除评论
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
