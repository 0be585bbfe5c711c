// ==========================================
// 产线工装管理系统 - 产品族领域模型
// ==========================================
// 红线: code 为业务主键,全局唯一（仓储层保证）
// 用途: 产品配置主数据,设备数量台账
// ==========================================

use crate::domain::types::FamilyStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Family - 产品族
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    // ===== 主键 =====
    pub id: String,   // 实体ID（UUID）
    pub code: String, // 业务编码（唯一）

    // ===== 基础信息 =====
    pub name: String,              // 展示名称
    pub family_type: Option<String>, // 类别（自由文本）
    pub status: FamilyStatus,      // 状态
    pub description: String,       // 描述

    // ===== 设备数量台账 =====
    pub kits: i64,          // KIT 数量
    pub led: i64,           // LED 工位数量
    pub goullet: i64,       // Goullet 工位数量
    pub bcc_optosoft: i64,  // BCC Optosoft 数量
    pub bcc_main: i64,      // BCC Main 数量
    pub rob_main: i64,      // Rob Main 数量
    pub rob_suite: i64,     // Rob Suite 数量
    pub torque: i64,        // Torque 数量
    pub rack_30: i64,       // Rack 30 数量
    pub machine_visio: i64, // Machine Visio 数量

    // ===== 冗余汇总 =====
    pub comment: String,               // 备注
    pub total_holders: i64,            // 工装总数（冗余计数）
    pub rob_assignments: Vec<String>,  // 关联 ROB 标签（展示用）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 创建时间
    pub updated_at: DateTime<Utc>, // 更新时间
    pub created_by: String,        // 创建人
}

// ==========================================
// NewFamily - 创建输入
// ==========================================
// 用途: 创建操作入参（id/时间戳由仓储层生成）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFamily {
    pub name: String,
    pub code: String,
    pub family_type: Option<String>,
    pub status: FamilyStatus,
    pub description: String,
    pub kits: i64,
    pub led: i64,
    pub goullet: i64,
    pub bcc_optosoft: i64,
    pub bcc_main: i64,
    pub rob_main: i64,
    pub rob_suite: i64,
    pub torque: i64,
    pub rack_30: i64,
    pub machine_visio: i64,
    pub comment: String,
    pub total_holders: i64,
    pub rob_assignments: Vec<String>,
}

impl NewFamily {
    /// 最小创建输入（台账计数默认 0）
    pub fn minimal(name: &str, code: &str, status: FamilyStatus) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            family_type: None,
            status,
            description: String::new(),
            kits: 0,
            led: 0,
            goullet: 0,
            bcc_optosoft: 0,
            bcc_main: 0,
            rob_main: 0,
            rob_suite: 0,
            torque: 0,
            rack_30: 0,
            machine_visio: 0,
            comment: String::new(),
            total_holders: 0,
            rob_assignments: Vec::new(),
        }
    }
}

// ==========================================
// FamilyPatch - 部分更新输入
// ==========================================
// 语义: None 表示不修改该字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub family_type: Option<Option<String>>,
    pub status: Option<FamilyStatus>,
    pub description: Option<String>,
    pub kits: Option<i64>,
    pub led: Option<i64>,
    pub goullet: Option<i64>,
    pub bcc_optosoft: Option<i64>,
    pub bcc_main: Option<i64>,
    pub rob_main: Option<i64>,
    pub rob_suite: Option<i64>,
    pub torque: Option<i64>,
    pub rack_30: Option<i64>,
    pub machine_visio: Option<i64>,
    pub comment: Option<String>,
    pub total_holders: Option<i64>,
    pub rob_assignments: Option<Vec<String>>,
}

impl Family {
    /// 应用部分更新（不触碰审计字段，由仓储层统一盖章）
    pub fn apply_patch(&mut self, patch: &FamilyPatch) {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.code {
            self.code = v.clone();
        }
        if let Some(v) = &patch.family_type {
            self.family_type = v.clone();
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = &patch.description {
            self.description = v.clone();
        }
        if let Some(v) = patch.kits {
            self.kits = v;
        }
        if let Some(v) = patch.led {
            self.led = v;
        }
        if let Some(v) = patch.goullet {
            self.goullet = v;
        }
        if let Some(v) = patch.bcc_optosoft {
            self.bcc_optosoft = v;
        }
        if let Some(v) = patch.bcc_main {
            self.bcc_main = v;
        }
        if let Some(v) = patch.rob_main {
            self.rob_main = v;
        }
        if let Some(v) = patch.rob_suite {
            self.rob_suite = v;
        }
        if let Some(v) = patch.torque {
            self.torque = v;
        }
        if let Some(v) = patch.rack_30 {
            self.rack_30 = v;
        }
        if let Some(v) = patch.machine_visio {
            self.machine_visio = v;
        }
        if let Some(v) = &patch.comment {
            self.comment = v.clone();
        }
        if let Some(v) = patch.total_holders {
            self.total_holders = v;
        }
        if let Some(v) = &patch.rob_assignments {
            self.rob_assignments = v.clone();
        }
    }
}
