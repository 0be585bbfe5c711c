// ==========================================
// 产线工装管理系统 - 领域类型定义
// ==========================================
// 红线: 状态词表是封闭集合,导入校验与实体共用同一份定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 产品族状态 (Family Status)
// ==========================================
// 序列化格式: snake_case (与导入/导出文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyStatus {
    Draft,       // 草稿
    Active,      // 激活
    Maintenance, // 维护中
    Archived,    // 归档
}

impl FamilyStatus {
    /// 词表（按导入报错时的展示顺序）
    pub const VOCABULARY: [&'static str; 4] = ["active", "draft", "maintenance", "archived"];

    /// 从字符串解析（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(FamilyStatus::Draft),
            "active" => Some(FamilyStatus::Active),
            "maintenance" => Some(FamilyStatus::Maintenance),
            "archived" => Some(FamilyStatus::Archived),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyStatus::Draft => "draft",
            FamilyStatus::Active => "active",
            FamilyStatus::Maintenance => "maintenance",
            FamilyStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for FamilyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 工装状态 (Holder Status)
// ==========================================
// 红线: Assigned 当且仅当 rob_id 非空（引擎层保证）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderStatus {
    Available,    // 可用
    Assigned,     // 已分配
    Maintenance,  // 维护中
    OutOfService, // 停用
}

impl HolderStatus {
    pub const VOCABULARY: [&'static str; 4] =
        ["available", "assigned", "maintenance", "out_of_service"];

    /// 从字符串解析（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" => Some(HolderStatus::Available),
            "assigned" => Some(HolderStatus::Assigned),
            "maintenance" => Some(HolderStatus::Maintenance),
            "out_of_service" => Some(HolderStatus::OutOfService),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HolderStatus::Available => "available",
            HolderStatus::Assigned => "assigned",
            HolderStatus::Maintenance => "maintenance",
            HolderStatus::OutOfService => "out_of_service",
        }
    }
}

impl fmt::Display for HolderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// ROB 工作站类型 (ROB Type)
// ==========================================
// 红线: 类型在创建后不可变更
// SERIAL=在产 / MPR=遗留 / MYC=规划
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RobType {
    Serial,
    Mpr,
    Myc,
}

impl RobType {
    pub const VOCABULARY: [&'static str; 3] = ["SERIAL", "MPR", "MYC"];

    /// 从字符串解析（大小写不敏感，统一转大写比较）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SERIAL" => Some(RobType::Serial),
            "MPR" => Some(RobType::Mpr),
            "MYC" => Some(RobType::Myc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RobType::Serial => "SERIAL",
            RobType::Mpr => "MPR",
            RobType::Myc => "MYC",
        }
    }
}

impl fmt::Display for RobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// ROB 工作站状态 (ROB Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobStatus {
    Active,      // 运行中
    Inactive,    // 未启用
    Maintenance, // 维护中
    Stopped,     // 停机
}

impl RobStatus {
    pub const VOCABULARY: [&'static str; 4] = ["active", "inactive", "maintenance", "stopped"];

    /// 从字符串解析（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(RobStatus::Active),
            "inactive" => Some(RobStatus::Inactive),
            "maintenance" => Some(RobStatus::Maintenance),
            "stopped" => Some(RobStatus::Stopped),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RobStatus::Active => "active",
            RobStatus::Inactive => "inactive",
            RobStatus::Maintenance => "maintenance",
            RobStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 审计操作类型 (Audit Operation)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditOperation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOperation::Create => write!(f, "CREATE"),
            AuditOperation::Update => write!(f, "UPDATE"),
            AuditOperation::Delete => write!(f, "DELETE"),
        }
    }
}

// ==========================================
// 实体集合标识 (Entity Kind)
// ==========================================
// 用途: 检索过滤 / 导入文件分类 / 审计表名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Families,
    Holders,
    Robs,
}

impl EntityKind {
    /// 审计日志中的集合名
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Families => "families",
            EntityKind::Holders => "holders",
            EntityKind::Robs => "robs",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_status_parse_case_insensitive() {
        assert_eq!(FamilyStatus::parse("Active"), Some(FamilyStatus::Active));
        assert_eq!(FamilyStatus::parse(" ARCHIVED "), Some(FamilyStatus::Archived));
        assert_eq!(FamilyStatus::parse("unknown"), None);
    }

    #[test]
    fn test_rob_type_parse_uppercases() {
        assert_eq!(RobType::parse("serial"), Some(RobType::Serial));
        assert_eq!(RobType::parse("Mpr"), Some(RobType::Mpr));
        assert_eq!(RobType::parse("XYZ"), None);
    }

    #[test]
    fn test_holder_status_roundtrip() {
        for s in HolderStatus::VOCABULARY {
            let parsed = HolderStatus::parse(s).unwrap();
            assert_eq!(parsed.as_str(), s);
        }
    }

    #[test]
    fn test_serde_rename() {
        let json = serde_json::to_string(&RobType::Serial).unwrap();
        assert_eq!(json, "\"SERIAL\"");
        let json = serde_json::to_string(&HolderStatus::OutOfService).unwrap();
        assert_eq!(json, "\"out_of_service\"");
    }
}
