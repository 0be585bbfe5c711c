// ==========================================
// 产线工装管理系统 - 行记录映射器
// ==========================================
// 职责: 阶段 2,把松散的列名→值映射折叠为带标签的行变体,
//       下游校验按变体穷尽匹配,不再做字符串键查找
// 约定: 缺列按空串处理,类型转换推迟到应用阶段
//       （校验需要原文才能产出完整的逐行报错）
// ==========================================

use crate::importer::classifier::{columns, FileKind};
use crate::importer::file_parser::RawRow;
use serde::{Deserialize, Serialize};

// ==========================================
// 行变体
// ==========================================

/// 产品族数据行（原文字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyRow {
    pub row_number: usize,
    pub name: String,
    pub code: String,
    pub family_type: String,
    pub status: String,
    /// 数值列原文,(列名, 值) 按固定展示顺序
    pub counters: Vec<(String, String)>,
    pub comment: String,
}

/// 工装数据行（原文字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolderRow {
    pub row_number: usize,
    pub holder_id: String,
    pub name: String,
    pub family_code: String,
    pub status: String,
    pub rob_assignment: String,
    pub assigned_date: String,
}

/// ROB 数据行（原文字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobRow {
    pub row_number: usize,
    pub rob_id: String,
    pub name: String,
    pub rob_type: String,
    pub capacity: String,
    pub current_load: String,
    pub status: String,
}

/// 带标签的行记录（分类产物,Unknown 文件不产行记录）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordRow {
    Family(FamilyRow),
    Holder(HolderRow),
    Rob(RobRow),
}

impl RecordRow {
    pub fn row_number(&self) -> usize {
        match self {
            RecordRow::Family(r) => r.row_number,
            RecordRow::Holder(r) => r.row_number,
            RecordRow::Rob(r) => r.row_number,
        }
    }
}

// ==========================================
// 映射
// ==========================================

/// 把原始行映射为分类后的行变体
///
/// Unknown 类型返回 None（跳过字段级校验）
pub fn map_row(kind: FileKind, raw: &RawRow) -> Option<RecordRow> {
    match kind {
        FileKind::Families => Some(RecordRow::Family(FamilyRow {
            row_number: raw.row_number,
            name: raw.get(columns::FAMILY_NAME).to_string(),
            code: raw.get(columns::FAMILY_CODE).to_string(),
            family_type: raw.get(columns::TYPE).to_string(),
            status: raw.get(columns::STATUS).to_string(),
            counters: columns::FAMILY_NUMERIC
                .iter()
                .map(|col| (col.to_string(), raw.get(col).to_string()))
                .collect(),
            comment: raw.get(columns::COMMENT).to_string(),
        })),
        FileKind::Holders => Some(RecordRow::Holder(HolderRow {
            row_number: raw.row_number,
            holder_id: raw.get(columns::HOLDER_ID).to_string(),
            name: raw.get(columns::HOLDER_NAME).to_string(),
            family_code: raw.get(columns::FAMILY_CODE).to_string(),
            status: raw.get(columns::STATUS).to_string(),
            rob_assignment: raw.get(columns::ROB_ASSIGNMENT).to_string(),
            assigned_date: raw.get(columns::ASSIGNED_DATE).to_string(),
        })),
        FileKind::Robs => Some(RecordRow::Rob(RobRow {
            row_number: raw.row_number,
            rob_id: raw.get(columns::ROB_ID).to_string(),
            name: raw.get(columns::ROB_NAME).to_string(),
            rob_type: raw.get(columns::TYPE).to_string(),
            capacity: raw.get(columns::CAPACITY).to_string(),
            current_load: raw.get(columns::CURRENT_LOAD).to_string(),
            status: raw.get(columns::STATUS).to_string(),
        })),
        FileKind::Unknown => None,
    }
}
