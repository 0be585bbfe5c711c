// ==========================================
// 产线工装管理系统 - API层错误类型
// ==========================================
// 职责: 把仓储/引擎/导入层错误转换为面向调用方的错误
// 约定: 可预期失败（容量满/重码/缺引用）一律结构化返回,
//       调用方负责渲染与重试交互
// ==========================================

use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::store::StoreError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 权限 =====
    #[error("权限不足: 需要 {permission}")]
    PermissionDenied { permission: String },

    // ===== 业务规则 =====
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("唯一约束违反: {0}")]
    DuplicateKey(String),

    #[error("容量约束违反: {0}")]
    CapacityExceeded(String),

    #[error("无效的实体状态: {0}")]
    InvalidState(String),

    #[error("不可变字段: {0}")]
    ImmutableField(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ===== 管道 =====
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("导入已取消")]
    ImportCancelled,

    #[error("文件导出失败: {0}")]
    ExportError(String),

    // ===== 通用 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 StoreError 转换
// ==========================================
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            StoreError::DuplicateKey { .. } => ApiError::DuplicateKey(err.to_string()),
            StoreError::CapacityExceeded { .. } => ApiError::CapacityExceeded(err.to_string()),
            StoreError::InvalidState(msg) => ApiError::InvalidState(msg),
            StoreError::InvalidStateTransition { .. } => ApiError::InvalidState(err.to_string()),
            StoreError::ImmutableField { .. } => ApiError::ImmutableField(err.to_string()),
            StoreError::FieldValueError { .. } => ApiError::ValidationError(err.to_string()),
            StoreError::LockError(msg) | StoreError::InternalError(msg) => {
                ApiError::InternalError(msg)
            }
            StoreError::Other(e) => ApiError::Other(e),
        }
    }
}

// ==========================================
// 从 ImportError / ExportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Cancelled => ApiError::ImportCancelled,
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
