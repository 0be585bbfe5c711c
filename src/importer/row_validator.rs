// ==========================================
// 产线工装管理系统 - 行级校验器
// ==========================================
// 职责: 阶段 3,对分类后的行变体做字段级校验
// 约定: 坏行不中断,违规按行收集; 消息格式固定为
//       "Row <n>: <description>",n 为文件内人读行号
// 纯度: 只读数据集快照,从不触碰活动集合,
//       相同输入必然产出相同的有序消息列表
// ==========================================

use crate::domain::types::{FamilyStatus, HolderStatus, RobStatus, RobType};
use crate::importer::row_mapper::{FamilyRow, HolderRow, RecordRow, RobRow};
use crate::store::dataset::DatasetSnapshot;
use std::collections::HashSet;

// ==========================================
// RowValidator - 行级校验器
// ==========================================
pub struct RowValidator {
    /// 现存业务键快照（唯一性/外键存在性检查依据）
    snapshot: DatasetSnapshot,
    /// 同批次内已见过的产品族编码（批内查重）
    seen_family_codes: HashSet<String>,
}

impl RowValidator {
    pub fn new(snapshot: DatasetSnapshot) -> Self {
        Self {
            snapshot,
            seen_family_codes: HashSet::new(),
        }
    }

    /// 校验一行,返回其违规消息（空即通过）
    ///
    /// 消息顺序与字段检查顺序固定,保证确定性
    pub fn validate(&mut self, record: &RecordRow) -> Vec<String> {
        match record {
            RecordRow::Family(row) => self.validate_family(row),
            RecordRow::Holder(row) => self.validate_holder(row),
            RecordRow::Rob(row) => self.validate_rob(row),
        }
    }

    // ==========================================
    // 产品族行
    // ==========================================
    fn validate_family(&mut self, row: &FamilyRow) -> Vec<String> {
        let n = row.row_number;
        let mut errors = Vec::new();

        if row.name.trim().is_empty() {
            errors.push(format!("Row {}: Family Name is required", n));
        }

        let code = row.code.trim();
        if code.is_empty() {
            errors.push(format!("Row {}: Family Code is required", n));
        } else if self.snapshot.family_codes.contains(code)
            || !self.seen_family_codes.insert(code.to_string())
        {
            errors.push(format!("Row {}: Family Code '{}' already exists", n, code));
        }

        let status = row.status.trim();
        if !status.is_empty() && FamilyStatus::parse(status).is_none() {
            errors.push(format!(
                "Row {}: Invalid status '{}'. Must be one of: {}",
                n,
                status,
                FamilyStatus::VOCABULARY.join(", ")
            ));
        }

        for (column, value) in &row.counters {
            let value = value.trim();
            if !value.is_empty() && value.parse::<f64>().is_err() {
                errors.push(format!("Row {}: {} must be a number", n, column));
            }
        }

        errors
    }

    // ==========================================
    // 工装行
    // ==========================================
    fn validate_holder(&mut self, row: &HolderRow) -> Vec<String> {
        let n = row.row_number;
        let mut errors = Vec::new();

        if row.holder_id.trim().is_empty() {
            errors.push(format!("Row {}: Holder ID is required", n));
        }

        if row.name.trim().is_empty() {
            errors.push(format!("Row {}: Holder Name is required", n));
        }

        // 外键存在性: 仅在填写时检查（必填性由结构校验的列要求保证）
        let family_code = row.family_code.trim();
        if !family_code.is_empty() && !self.snapshot.family_codes.contains(family_code) {
            errors.push(format!(
                "Row {}: Family Code '{}' does not exist",
                n, family_code
            ));
        }

        let status = row.status.trim();
        if !status.is_empty() && HolderStatus::parse(status).is_none() {
            errors.push(format!(
                "Row {}: Invalid status '{}'. Must be one of: {}",
                n,
                status,
                HolderStatus::VOCABULARY.join(", ")
            ));
        }

        errors
    }

    // ==========================================
    // ROB 行
    // ==========================================
    fn validate_rob(&mut self, row: &RobRow) -> Vec<String> {
        let n = row.row_number;
        let mut errors = Vec::new();

        if row.rob_id.trim().is_empty() {
            errors.push(format!("Row {}: ROB ID is required", n));
        }

        if row.name.trim().is_empty() {
            errors.push(format!("Row {}: ROB Name is required", n));
        }

        // 类型必填且受词表约束
        let rob_type = row.rob_type.trim();
        if RobType::parse(rob_type).is_none() {
            errors.push(format!(
                "Row {}: Invalid type '{}'. Must be one of: {}",
                n,
                rob_type,
                RobType::VOCABULARY.join(", ")
            ));
        }

        // 容量必填,必须为正整数
        let capacity_ok = row
            .capacity
            .trim()
            .parse::<u32>()
            .map(|c| c > 0)
            .unwrap_or(false);
        if !capacity_ok {
            errors.push(format!("Row {}: Capacity must be a positive number", n));
        }

        let status = row.status.trim();
        if !status.is_empty() && RobStatus::parse(status).is_none() {
            errors.push(format!(
                "Row {}: Invalid status '{}'. Must be one of: {}",
                n,
                status,
                RobStatus::VOCABULARY.join(", ")
            ));
        }

        errors
    }
}
