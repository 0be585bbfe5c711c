// ==========================================
// 产线工装管理系统 - 审计日志领域模型
// ==========================================
// 红线: 所有写入必须记录,仅追加,不可改写
// 用途: 审计追踪,变更回溯展示
// ==========================================

use crate::domain::types::AuditOperation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

// ==========================================
// AuditLog - 审计日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,               // 日志ID（UUID）
    pub table_name: String,       // 实体集合名（families/holders/robs）
    pub operation: AuditOperation, // 操作类型
    pub old_data: Option<JsonValue>, // 变更前快照
    pub new_data: Option<JsonValue>, // 变更后快照
    pub actor: String,            // 操作人
    pub timestamp: DateTime<Utc>, // 操作时间
}

impl AuditLog {
    /// 构造一条审计记录（快照由调用方序列化）
    pub fn record(
        table_name: &str,
        operation: AuditOperation,
        old_data: Option<JsonValue>,
        new_data: Option<JsonValue>,
        actor: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            table_name: table_name.to_string(),
            operation,
            old_data,
            new_data,
            actor: actor.to_string(),
            timestamp: Utc::now(),
        }
    }
}
