// ==========================================
// 产线工装管理系统 - 操作人与权限接缝
// ==========================================
// 职责: 认证体系在核心之外,核心只消费两件事:
//   1. 当前操作人标识（审计归属）
//   2. 权限判断函数 has_permission(name) -> bool
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 权限名常量
// ==========================================
pub mod permissions {
    pub const MANAGE_FAMILIES: &str = "manage_families";
    pub const MANAGE_HOLDERS: &str = "manage_holders";
    pub const MANAGE_ROBS: &str = "manage_robs";
    pub const IMPORT_DATA: &str = "import_data";
    pub const EXPORT_DATA: &str = "export_data";
}

// ==========================================
// ActorContext - 操作人上下文
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorContext {
    pub actor_id: String, // 操作人标识（审计归属）
}

impl ActorContext {
    pub fn new(actor_id: &str) -> Self {
        Self {
            actor_id: actor_id.to_string(),
        }
    }

    /// 系统内部操作（定时任务/导入批处理等）
    pub fn system() -> Self {
        Self::new("system")
    }
}

// ==========================================
// PermissionChecker - 权限判断接口
// ==========================================
// 实现方: 外部认证集成; 测试使用 AllowAll
pub trait PermissionChecker: Send + Sync {
    fn has_permission(&self, name: &str) -> bool;
}

/// 放行全部权限（测试 / 单机模式）
pub struct AllowAll;

impl PermissionChecker for AllowAll {
    fn has_permission(&self, _name: &str) -> bool {
        true
    }
}

/// 固定权限集合（由外部认证层装配）
pub struct StaticPermissions {
    granted: Vec<String>,
}

impl StaticPermissions {
    pub fn new(granted: Vec<String>) -> Self {
        Self { granted }
    }
}

impl PermissionChecker for StaticPermissions {
    fn has_permission(&self, name: &str) -> bool {
        self.granted.iter().any(|g| g == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_permissions() {
        let checker = StaticPermissions::new(vec![permissions::IMPORT_DATA.to_string()]);
        assert!(checker.has_permission(permissions::IMPORT_DATA));
        assert!(!checker.has_permission(permissions::MANAGE_ROBS));
    }
}
