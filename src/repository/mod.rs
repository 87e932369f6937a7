//! Database repository layer

pub mod comment_repo;
pub mod post_repo;
pub mod user_repo;

pub use comment_repo::*;
pub use post_repo::*;
pub use user_repo::*;
