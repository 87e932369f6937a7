//! User repository (数据库访问层)

use crate::{error::AppError, models::user::*};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 根据 ID 查找用户
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 根据邮箱查找用户（登录）
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 创建用户
    ///
    /// 用户名或邮箱的唯一约束冲突映射为 Conflict（409）
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Username or email already taken".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(user)
    }

    /// 更新用户资料（仅 bio/avatar 可变）
    pub async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                bio = COALESCE($2, bio),
                avatar = COALESCE($3, avatar)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.bio)
        .bind(&req.avatar)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }
}
