//! 认证服务：注册与登录

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::{auth::*, user::*},
    repository::user_repo::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>, config: Arc<AppConfig>) -> Self {
        Self {
            db,
            jwt_service,
            config,
        }
    }

    /// 用户注册
    ///
    /// 用户名/邮箱重复返回 Conflict，不创建任何记录
    pub async fn signup(&self, req: SignupRequest) -> Result<AuthResponse, AppError> {
        req.validate().map_err(|e| AppError::validation(&e))?;
        PasswordHasher::validate_password_policy(&req.password, &self.config)?;

        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        let user_repo = UserRepository::new(self.db.clone());
        let user = user_repo
            .create(req.username.trim(), req.email.trim(), &password_hash)
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        let token = self.jwt_service.issue(&user.id, &user.username)?;

        Ok(AuthResponse {
            token,
            expires_in: self.jwt_service.token_exp_secs(),
            user: UserResponse::from(user),
        })
    }

    /// 用户登录
    ///
    /// 未知邮箱与错误密码对外不可区分，统一返回 InvalidCredentials
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user: User = user_repo
            .find_by_email(req.email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hasher = PasswordHasher::new();
        hasher.verify(&req.password, &user.password_hash)?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        let token = self.jwt_service.issue(&user.id, &user.username)?;

        Ok(AuthResponse {
            token,
            expires_in: self.jwt_service.token_exp_secs(),
            user: UserResponse::from(user),
        })
    }
}
