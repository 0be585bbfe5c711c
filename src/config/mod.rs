// ==========================================
// 产线工装管理系统 - 配置层
// ==========================================
// 职责: 系统配置管理,内置默认值 + 文件覆写
// ==========================================

pub mod console_config;

// 重导出核心配置
pub use console_config::{ConsoleConfig, ImportConfig};
