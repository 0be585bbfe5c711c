// ==========================================
// 产线工装管理系统 - API 层
// ==========================================
// 职责: 提供业务接口,权限把关 + 审计落账,
//       供外部集成（UI/服务端）调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod export_api;
pub mod family_api;
pub mod holder_api;
pub mod import_api;
pub mod rob_api;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, Kpis};
pub use error::{ApiError, ApiResult};
pub use export_api::ExportApi;
pub use family_api::FamilyApi;
pub use holder_api::HolderApi;
pub use import_api::ImportApi;
pub use rob_api::RobApi;
