// ==========================================
// 产线工装管理系统 - 核心库
// ==========================================
// 技术栈: Rust + tokio + serde
// 系统定位: 产品族/工装夹具/ROB 工作站的
//           分配一致性核心 + 表格导入校验管道
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod store;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 外发数据
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AuditOperation, EntityKind, FamilyStatus, HolderStatus, RobStatus, RobType,
};

// 领域实体
pub use domain::{
    ActorContext, AuditLog, Family, FamilyPatch, Holder, NewFamily, NewHolder, NewRob,
    PermissionChecker, Rob, RobPatch,
};

// 仓储
pub use store::{new_shared_dataset, DataSet, SharedDataSet, StoreError, StoreResult};

// 引擎
pub use engine::{AssignmentEngine, SearchEngine, SearchFilters, SearchHit};

// 导入/导出
pub use exporter::CsvExporter;
pub use importer::{CancelFlag, ImportReport, ImportService, ImportServiceImpl};

// API
pub use api::{DashboardApi, ExportApi, FamilyApi, HolderApi, ImportApi, RobApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产线工装管理系统";

// ==========================================
// 预编译检查
// ==========================================
