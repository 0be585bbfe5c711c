// ==========================================
// 产线工装管理系统 - 工装夹具领域模型
// ==========================================
// 红线: status == Assigned 当且仅当 rob_id 非空
// 红线: assigned_at 与 rob_id 同生同灭
// 写入方: 仅 AssignmentEngine（引擎层唯一写者）
// ==========================================

use crate::domain::types::HolderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Holder - 工装夹具
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holder {
    // ===== 主键 =====
    pub id: String, // 实体ID（导入时可由文件指定，否则 UUID）

    // ===== 基础信息 =====
    pub name: String,      // 展示名称
    pub family_id: String, // 所属产品族ID
    pub status: HolderStatus,

    // ===== 分配关系（与 Rob.assigned_holders 成对维护）=====
    pub rob_id: Option<String>,             // 当前分配的 ROB
    pub assigned_at: Option<DateTime<Utc>>, // 分配时间

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
}

impl Holder {
    /// 一致性自检: 状态与分配引用是否同步
    ///
    /// 引擎层每次写入后的内部断言依据
    pub fn is_consistent(&self) -> bool {
        let assigned = self.status == HolderStatus::Assigned;
        assigned == self.rob_id.is_some() && assigned == self.assigned_at.is_some()
    }
}

// ==========================================
// NewHolder - 创建输入
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHolder {
    /// 指定实体ID（导入场景使用文件内的 Holder ID；None 则生成 UUID）
    pub id: Option<String>,
    pub name: String,
    pub family_id: String,
    /// 初始状态（默认 Available；不允许直接创建为 Assigned）
    pub status: HolderStatus,
}

impl NewHolder {
    pub fn available(name: &str, family_id: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            family_id: family_id.to_string(),
            status: HolderStatus::Available,
        }
    }
}
