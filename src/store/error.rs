// ==========================================
// 产线工装管理系统 - 仓储/引擎层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// 约定: 可预期的业务失败一律走类型化 Result,不抛 panic
// ==========================================

use thiserror::Error;

/// 仓储层与分配引擎共用的错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== 数据访问错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("唯一约束违反: {entity}.{key} = '{value}' 已存在")]
    DuplicateKey {
        entity: String,
        key: String,
        value: String,
    },

    #[error("数据集锁获取失败: {0}")]
    LockError(String),

    // ===== 业务规则错误 =====
    #[error("容量已满: ROB {rob_id} 当前负载已达容量上限 {capacity}")]
    CapacityExceeded { rob_id: String, capacity: u32 },

    #[error("无效的实体状态: {0}")]
    InvalidState(String),

    #[error("无效的状态转换: {entity} from={from} to={to}")]
    InvalidStateTransition {
        entity: String,
        from: String,
        to: String,
    },

    #[error("不可变字段: {entity}.{field} 创建后禁止修改")]
    ImmutableField { entity: String, field: String },

    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// NotFound 便捷构造
    pub fn not_found(entity: &str, id: &str) -> Self {
        StoreError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// DuplicateKey 便捷构造
    pub fn duplicate_key(entity: &str, key: &str, value: &str) -> Self {
        StoreError::DuplicateKey {
            entity: entity.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;
