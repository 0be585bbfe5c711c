// ==========================================
// 产线工装管理系统 - 导入模块错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// 分级: Parse/Structure 为致命错误,行级违规不进此枚举
//       （行级违规按行收集进报告,坏行不得中断后续行）
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    // ===== 解析/结构错误（致命,立即中止）=====
    #[error("解析失败: {0}")]
    Parse(String),

    #[error("结构校验失败: {0}")]
    Structure(String),

    // ===== 流程控制 =====
    #[error("导入已取消")]
    Cancelled,

    // ===== 应用阶段错误 =====
    #[error("数据集访问失败: {0}")]
    StoreError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Parse(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<StoreError>
impl From<crate::store::StoreError> for ImportError {
    fn from(err: crate::store::StoreError) -> Self {
        ImportError::StoreError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
