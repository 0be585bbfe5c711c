// ==========================================
// 产线工装管理系统 - ROB 工作站领域模型
// ==========================================
// 红线: current_load == assigned_holders.len() 且 current_load <= capacity
// 红线: rob_type 创建后不可变更
// 写入方: 仅 AssignmentEngine（引擎层唯一写者）
// ==========================================

use crate::domain::types::{RobStatus, RobType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Rob - ROB 工作站（生产单元）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rob {
    // ===== 主键 =====
    pub id: String, // 实体ID（导入时可由文件指定，否则 UUID）

    // ===== 基础信息 =====
    pub name: String,
    pub rob_type: RobType, // 类型（写一次）
    pub status: RobStatus,

    // ===== 容量账目 =====
    pub capacity: u32,     // 容量上限（正整数）
    pub current_load: u32, // 当前负载（已分配工装数）

    // ===== 分配关系（与 Holder.rob_id 成对维护）=====
    pub assigned_holders: Vec<String>, // 已分配工装ID（按分配顺序）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rob {
    /// 剩余容量
    pub fn remaining_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.current_load)
    }

    /// 是否可接收新分配（不含状态判断，状态由引擎层把关）
    pub fn has_capacity(&self) -> bool {
        self.current_load < self.capacity
    }

    /// 一致性自检: 负载计数与分配列表是否同步、是否超容
    pub fn is_consistent(&self) -> bool {
        self.current_load as usize == self.assigned_holders.len()
            && self.current_load <= self.capacity
    }
}

// ==========================================
// NewRob - 创建输入
// ==========================================
// 创建时负载恒为 0,分配列表恒为空
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRob {
    /// 指定实体ID（导入场景使用文件内的 ROB ID；None 则生成 UUID）
    pub id: Option<String>,
    pub name: String,
    pub rob_type: RobType,
    pub capacity: u32,
    pub status: RobStatus,
}

impl NewRob {
    pub fn active(name: &str, rob_type: RobType, capacity: u32) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            rob_type,
            capacity,
            status: RobStatus::Active,
        }
    }
}

// ==========================================
// RobPatch - 部分更新输入
// ==========================================
// 约束: 不含 rob_type（不可变字段）、不含负载/分配列表（引擎专有）
// rob_type 变更尝试通过引擎层入参单独表达并被拒绝
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobPatch {
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub status: Option<RobStatus>,
    /// 类型变更请求（恒被拒绝，用于显式报 ImmutableField）
    pub rob_type: Option<RobType>,
}
