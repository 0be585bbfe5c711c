// ==========================================
// 产线工装管理系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写出失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("渲染失败: {0}")]
    Render(String),

    #[error("数据集访问失败: {0}")]
    Store(String),
}

impl From<crate::store::StoreError> for ExportError {
    fn from(err: crate::store::StoreError) -> Self {
        ExportError::Store(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
