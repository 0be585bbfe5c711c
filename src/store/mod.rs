// ==========================================
// 产线工装管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务编排
// 红线: 集合只经仓储/引擎修改,调用方不得直接触碰
// ==========================================
// 职责: 内存数据集的访问接口与完整性约束
// ==========================================

pub mod audit_log_repo;
pub mod dataset;
pub mod error;
pub mod family_repo;
pub mod holder_repo;
pub mod rob_repo;

// 重导出核心仓储
pub use audit_log_repo::AuditLogRepository;
pub use dataset::{lock_dataset, new_shared_dataset, DataSet, DatasetSnapshot, SharedDataSet};
pub use error::{StoreError, StoreResult};
pub use family_repo::FamilyRepository;
pub use holder_repo::HolderRepository;
pub use rob_repo::RobRepository;
