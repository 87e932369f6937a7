//! HTTP 处理器模块

pub mod auth;
pub mod comment;
pub mod health;
pub mod metrics;
pub mod post;
pub mod user;
