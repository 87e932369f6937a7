//! 资源属主授权
//! 纯决策函数：只有资源属主可以修改或删除资源

use crate::error::AppError;
use uuid::Uuid;

/// 授权决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipDecision {
    Allow,
    Deny,
}

/// 属主判定
///
/// 唯一的放行条件是属主 ID 与调用者 ID 相等。
/// 本系统没有角色层级，也没有管理员越权（明确的功能限制）。
pub fn authorize(resource_owner_id: Uuid, caller_id: Uuid) -> OwnershipDecision {
    if resource_owner_id == caller_id {
        OwnershipDecision::Allow
    } else {
        OwnershipDecision::Deny
    }
}

/// 属主校验，拒绝时返回 Forbidden
///
/// 调用方必须先完成认证检查（401）和资源存在性检查（404），
/// 再做属主检查（403），避免向未认证调用者泄露资源存在性
pub fn require_owner(resource_owner_id: Uuid, caller_id: Uuid) -> Result<(), AppError> {
    match authorize(resource_owner_id, caller_id) {
        OwnershipDecision::Allow => Ok(()),
        OwnershipDecision::Deny => {
            tracing::debug!(
                owner_id = %resource_owner_id,
                caller_id = %caller_id,
                "Ownership check denied"
            );
            Err(AppError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_allows_owner() {
        let id = Uuid::new_v4();
        assert_eq!(authorize(id, id), OwnershipDecision::Allow);
    }

    #[test]
    fn test_authorize_denies_non_owner() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();
        assert_eq!(authorize(owner, caller), OwnershipDecision::Deny);
    }

    #[test]
    fn test_require_owner_maps_deny_to_forbidden() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();

        assert!(require_owner(owner, owner).is_ok());

        match require_owner(owner, caller) {
            Err(AppError::Forbidden) => {}
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }
}
