// ==========================================
// 产线工装管理系统 - 导入报告
// ==========================================
// 职责: 校验产物的结构化表示,供调用方渲染与应用
// 约定: 展示错误条数受上限约束（默认前 10 条）,
//       完整错误保留在被拒行记录里
// ==========================================

use crate::importer::classifier::FileKind;
use crate::importer::row_mapper::RecordRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// AcceptedRow / RejectedRow
// ==========================================

/// 通过校验的行（按输入顺序排列）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedRow {
    pub row_number: usize,
    pub record: RecordRow,
}

/// 被拒绝的行: 行号 + 原文 + 有序违规列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRow {
    pub row_number: usize,
    pub raw: HashMap<String, String>,
    pub errors: Vec<String>,
}

// ==========================================
// ImportReport - 校验报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub file_kind: FileKind,
    pub total_rows: usize,
    pub successful_rows: usize,
    pub error_rows: usize,
    pub accepted: Vec<AcceptedRow>,
    pub rejected: Vec<RejectedRow>,
    /// 展示用错误（前 N 条,N 由配置决定）
    pub errors: Vec<String>,
    /// 结构级警告（如零数据行）
    pub warnings: Vec<String>,
}

impl ImportReport {
    /// 是否全部通过
    pub fn is_clean(&self) -> bool {
        self.error_rows == 0
    }
}

// ==========================================
// ApplyOutcome - 应用结果
// ==========================================
// 应用是独立的后置步骤: 报告本身从不触碰数据集
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyOutcome {
    /// 成功落账的行数
    pub applied: usize,
    /// 应用阶段被跳过的行: (行号, 原因)
    /// （校验与应用之间数据集可能已变化,重查后冲突的行落到这里）
    pub skipped: Vec<(usize, String)>,
}
