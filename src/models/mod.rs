//! 数据模型模块

pub mod auth;
pub mod comment;
pub mod post;
pub mod user;

use std::borrow::Cow;
use validator::ValidationError;

/// 校验字符串去除首尾空白后非空
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}
