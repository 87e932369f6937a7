//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod ownership;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{extract_token, jwt_auth_middleware, AuthContext};
pub use ownership::{authorize, require_owner, OwnershipDecision};
pub use password::PasswordHasher;
