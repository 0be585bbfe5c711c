// ==========================================
// 产线工装管理系统 - 导入模板生成
// ==========================================
// 职责: 生成带示例行的导入模板（与导入侧列要求对齐）
// ==========================================

use crate::exporter::error::{ExportError, ExportResult};
use csv::WriterBuilder;

/// 产品族导入模板
pub fn family_template() -> ExportResult<String> {
    render(
        &[
            "Family Name",
            "Family Code",
            "Type",
            "Status",
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
            "Comment",
            "Total Holders",
        ],
        &[
            "EXAMPLE FAMILY",
            "EX-001",
            "Front Bumper",
            "active",
            "0",
            "0",
            "0",
            "1",
            "1",
            "0",
            "0",
            "0",
            "0",
            "0",
            "Example comment",
            "10",
        ],
    )
}

/// 工装导入模板
pub fn holder_template() -> ExportResult<String> {
    render(
        &[
            "Holder ID",
            "Holder Name",
            "Family Code",
            "Family Name",
            "Status",
            "ROB Assignment",
            "Assigned Date",
        ],
        &[
            "H001",
            "EXAMPLE-H001",
            "EX-001",
            "EXAMPLE FAMILY",
            "available",
            "",
            "",
        ],
    )
}

/// ROB 导入模板
pub fn rob_template() -> ExportResult<String> {
    render(
        &["ROB ID", "ROB Name", "Type", "Capacity", "Current Load", "Status"],
        &["R001", "ROB-EXAMPLE-001", "SERIAL", "50", "0", "active"],
    )
}

fn render(headers: &[&str], sample: &[&str]) -> ExportResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(headers)?;
    writer.write_record(sample)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Render(e.to_string()))
}
