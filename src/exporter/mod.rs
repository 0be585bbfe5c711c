// ==========================================
// 产线工装管理系统 - 导出层
// ==========================================
// 职责: 实体集合 → 分隔文本,导入模板生成
// 回程性质: 导出产物可直接重新导入（见集成测试）
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod templates;

// 重导出核心类型
pub use csv_exporter::{
    CsvExporter, FAMILY_EXPORT_HEADERS, HOLDER_EXPORT_HEADERS, ROB_EXPORT_HEADERS,
};
pub use error::{ExportError, ExportResult};
pub use templates::{family_template, holder_template, rob_template};
