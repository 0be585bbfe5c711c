// ==========================================
// 产线工装管理系统 - 领域层
// ==========================================
// 职责: 实体与类型定义,不含数据访问与业务编排
// ==========================================

pub mod actor;
pub mod audit_log;
pub mod family;
pub mod holder;
pub mod rob;
pub mod types;

// 重导出核心实体
pub use actor::{ActorContext, AllowAll, PermissionChecker, StaticPermissions};
pub use audit_log::AuditLog;
pub use family::{Family, FamilyPatch, NewFamily};
pub use holder::{Holder, NewHolder};
pub use rob::{NewRob, Rob, RobPatch};
pub use types::{AuditOperation, EntityKind, FamilyStatus, HolderStatus, RobStatus, RobType};
