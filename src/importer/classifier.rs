// ==========================================
// 产线工装管理系统 - 文件分类与结构校验
// ==========================================
// 职责: 阶段 1,按表头特征识别文件类型,核对必需列
// 约定: 识别不出类型时归为 Unknown,只做结构级检查,
//       跳过字段级校验
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawTable;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 列名常量
// ==========================================
pub mod columns {
    // 产品族文件
    pub const FAMILY_NAME: &str = "Family Name";
    pub const FAMILY_CODE: &str = "Family Code";
    pub const TYPE: &str = "Type";
    pub const STATUS: &str = "Status";
    pub const COMMENT: &str = "Comment";
    pub const TOTAL_HOLDERS: &str = "Total Holders";

    /// 产品族数值列（含设备台账与工装总数,报错展示顺序固定）
    pub const FAMILY_NUMERIC: [&str; 11] = [
        "KITs",
        "Led",
        "Goullet",
        "BCC Optosoft",
        "BCC Main",
        "Rob Main",
        "Rob Suite",
        "Torque",
        "Rack 30",
        "Machine Visio",
        TOTAL_HOLDERS,
    ];

    // 工装文件
    pub const HOLDER_ID: &str = "Holder ID";
    pub const HOLDER_NAME: &str = "Holder Name";
    pub const ROB_ASSIGNMENT: &str = "ROB Assignment";
    pub const ASSIGNED_DATE: &str = "Assigned Date";

    // ROB 文件
    pub const ROB_ID: &str = "ROB ID";
    pub const ROB_NAME: &str = "ROB Name";
    pub const CAPACITY: &str = "Capacity";
    pub const CURRENT_LOAD: &str = "Current Load";
}

// ==========================================
// FileKind - 导入文件类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Families,
    Holders,
    Robs,
    Unknown,
}

impl FileKind {
    /// 类型必需列（结构校验依据）
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            FileKind::Families => &[
                columns::FAMILY_NAME,
                columns::FAMILY_CODE,
                columns::TYPE,
                columns::STATUS,
            ],
            FileKind::Holders => &[
                columns::HOLDER_ID,
                columns::HOLDER_NAME,
                columns::FAMILY_CODE,
                columns::STATUS,
            ],
            FileKind::Robs => &[
                columns::ROB_ID,
                columns::ROB_NAME,
                columns::TYPE,
                columns::CAPACITY,
                columns::STATUS,
            ],
            FileKind::Unknown => &[],
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Families => write!(f, "families"),
            FileKind::Holders => write!(f, "holders"),
            FileKind::Robs => write!(f, "robs"),
            FileKind::Unknown => write!(f, "unknown"),
        }
    }
}

// ==========================================
// 分类
// ==========================================

/// 按表头特征识别文件类型
///
/// 判定顺序: 产品族 → 工装 → ROB,任一特征列命中即归类
pub fn classify(headers: &[String]) -> FileKind {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if has(columns::FAMILY_NAME) || has(columns::FAMILY_CODE) {
        // 工装文件同样携带 Family Code 列,须先排除
        if has(columns::HOLDER_ID) || has(columns::HOLDER_NAME) {
            return FileKind::Holders;
        }
        return FileKind::Families;
    }
    if has(columns::HOLDER_ID) || has(columns::HOLDER_NAME) {
        return FileKind::Holders;
    }
    if has(columns::ROB_ID) || has(columns::ROB_NAME) {
        return FileKind::Robs;
    }
    FileKind::Unknown
}

// ==========================================
// 结构校验
// ==========================================

/// 结构校验通过后的产物
#[derive(Debug, Clone)]
pub struct StructureReport {
    pub kind: FileKind,
    /// 非致命提示（如零数据行）
    pub warnings: Vec<String>,
}

/// 核对已分类文件的必需列,并收集结构级警告
///
/// # 失败
/// - 缺列时把全部缺失列并成一条 Structure 错误（致命,中止导入）
pub fn validate_structure(table: &RawTable) -> ImportResult<StructureReport> {
    let kind = classify(&table.headers);
    let mut warnings = Vec::new();

    if kind != FileKind::Unknown {
        let missing: Vec<&str> = kind
            .required_columns()
            .iter()
            .filter(|c| !table.headers.iter().any(|h| h == *c))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::Structure(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
    }

    if table.rows.is_empty() {
        warnings.push("No data rows found in file".to_string());
    }

    Ok(StructureReport { kind, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::CsvParser;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_families() {
        assert_eq!(
            classify(&headers(&["Family Name", "Family Code", "Type", "Status"])),
            FileKind::Families
        );
    }

    #[test]
    fn test_classify_holders_wins_over_family_code() {
        // 工装文件携带 Family Code（外键列）,不得被误判为产品族文件
        assert_eq!(
            classify(&headers(&["Holder ID", "Holder Name", "Family Code", "Status"])),
            FileKind::Holders
        );
    }

    #[test]
    fn test_classify_robs_and_unknown() {
        assert_eq!(
            classify(&headers(&["ROB ID", "ROB Name", "Type", "Capacity", "Status"])),
            FileKind::Robs
        );
        assert_eq!(classify(&headers(&["foo", "bar"])), FileKind::Unknown);
    }

    #[test]
    fn test_structure_missing_columns_single_error() {
        let table = CsvParser::parse_str("Family Name,Family Code\nA,1\n").unwrap();
        let err = validate_structure(&table).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Missing required fields: Type, Status"), "{}", msg);
    }

    #[test]
    fn test_structure_zero_rows_is_warning() {
        let table = CsvParser::parse_str("ROB ID,ROB Name,Type,Capacity,Status\n").unwrap();
        let report = validate_structure(&table).unwrap();
        assert_eq!(report.kind, FileKind::Robs);
        assert_eq!(report.warnings, vec!["No data rows found in file"]);
    }

    #[test]
    fn test_structure_unknown_kind_skips_column_check() {
        let table = CsvParser::parse_str("foo,bar\n1,2\n").unwrap();
        let report = validate_structure(&table).unwrap();
        assert_eq!(report.kind, FileKind::Unknown);
        assert!(report.warnings.is_empty());
    }
}
