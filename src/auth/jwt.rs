//! JWT token generation and validation
//! Stateless bearer tokens: validity is signature + expiry only

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Username
    pub username: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_exp_secs: u64,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        Ok(Self {
            encoding_key,
            decoding_key,
            token_exp_secs: config.security.token_exp_secs,
        })
    }

    /// Seconds until a freshly issued token expires
    pub fn token_exp_secs(&self) -> u64 {
        self.token_exp_secs
    }

    /// Issue a signed token for the given user
    pub fn issue(&self, user_id: &Uuid, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.token_exp_secs as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Validate and decode a token
    ///
    /// Expiry is exact: leeway is zero, a token whose exp has elapsed is
    /// rejected immediately. Expired and malformed/forged tokens are logged
    /// separately but both collapse to `Unauthorized` for the caller.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token validation failed: expired");
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {:?}", e);
                    }
                }
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn test_config() -> AppConfig {
        AppConfig {
            server: crate::config::ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: crate::config::DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: crate::config::LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: crate::config::SecurityConfig {
                jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
                token_exp_secs: 86400,
                password_min_length: 8,
            },
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let user_id = Uuid::new_v4();

        let token = service.issue(&user_id, "testuser").unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "testuser");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token_fails() {
        let service = JwtService::from_config(&test_config()).unwrap();
        assert!(service.verify("not_a_token").is_err());
    }

    #[test]
    fn test_tampered_token_fails() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let user_id = Uuid::new_v4();

        let token = service.issue(&user_id, "testuser").unwrap();

        // 篡改已签名部分的一个字节
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'a' { b'b' } else { b'a' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(service.verify(&tampered).is_err());
    }

    #[test]
    fn test_expired_token_fails() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let user_id = Uuid::new_v4();

        // 手工构造一个 exp 已过去 30 秒的令牌（使用同一密钥签名）
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            username: "testuser".to_string(),
            iat: now - 90,
            exp: now - 30,
        };
        let secret = "test_secret_key_32_characters_long!";
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        // 过期后必须立即拒绝，没有宽限窗口
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = test_config();
        config.security.jwt_secret = Secret::new("short".to_string());
        assert!(JwtService::from_config(&config).is_err());
    }
}
