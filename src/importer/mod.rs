// ==========================================
// 产线工装管理系统 - 导入层
// ==========================================
// 职责: 外部表格数据的解析、分类、校验与应用
// 支持: CSV, Excel
// 红线: 校验是输入的纯函数,从不改写活动集合;
//       应用是独立后置步骤,经仓储/引擎落账
// ==========================================

// 模块声明
pub mod classifier;
pub mod error;
pub mod file_parser;
pub mod import_service;
pub mod report;
pub mod row_mapper;
pub mod row_validator;

// 重导出核心类型
pub use classifier::{classify, validate_structure, FileKind, StructureReport};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawRow, RawTable, UniversalFileParser};
pub use import_service::{CancelFlag, ImportService, ImportServiceImpl};
pub use report::{AcceptedRow, ApplyOutcome, ImportReport, RejectedRow};
pub use row_mapper::{map_row, FamilyRow, HolderRow, RecordRow, RobRow};
pub use row_validator::RowValidator;
