// ==========================================
// 产线工装管理系统 - CSV 导出器
// ==========================================
// 职责: 把实体集合渲染为分隔文本
// 约定: 表头与导入侧必需列对齐,含分隔符/引号/换行的值
//       自动加引号,内嵌引号翻倍（csv crate 默认行为）
// 回程性质: 导出产物对空数据集重新校验必须全行通过
// ==========================================

use crate::domain::{Family, Holder, Rob};
use crate::exporter::error::{ExportError, ExportResult};
use chrono::SecondsFormat;
use csv::WriterBuilder;

// ==========================================
// 导出表头（列集与导入侧模板/必需列对齐）
// ==========================================

pub const FAMILY_EXPORT_HEADERS: [&str; 18] = [
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
    "Created At",
    "Updated At",
];

pub const HOLDER_EXPORT_HEADERS: [&str; 8] = [
    "Holder ID",
    "Holder Name",
    "Family Code",
    "Family Name",
    "Status",
    "ROB Assignment",
    "Assigned Date",
    "Created At",
];

pub const ROB_EXPORT_HEADERS: [&str; 8] = [
    "ROB ID",
    "ROB Name",
    "Type",
    "Capacity",
    "Current Load",
    "Status",
    "Created At",
    "Updated At",
];

// ==========================================
// CsvExporter - CSV 导出器
// ==========================================
pub struct CsvExporter;

impl CsvExporter {
    /// 渲染产品族集合（顺序与集合一致）
    pub fn render_families(families: &[Family]) -> ExportResult<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(FAMILY_EXPORT_HEADERS)?;

        for f in families {
            let record = [
                f.name.clone(),
                f.code.clone(),
                f.family_type.clone().unwrap_or_default(),
                f.status.to_string(),
                f.kits.to_string(),
                f.led.to_string(),
                f.goullet.to_string(),
                f.bcc_optosoft.to_string(),
                f.bcc_main.to_string(),
                f.rob_main.to_string(),
                f.rob_suite.to_string(),
                f.torque.to_string(),
                f.rack_30.to_string(),
                f.machine_visio.to_string(),
                f.comment.clone(),
                f.total_holders.to_string(),
                f.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                f.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ];
            writer.write_record(&record)?;
        }

        Self::finish(writer)
    }

    /// 渲染工装集合（外联产品族/ROB 取展示名）
    pub fn render_holders(
        holders: &[Holder],
        families: &[Family],
        robs: &[Rob],
    ) -> ExportResult<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(HOLDER_EXPORT_HEADERS)?;

        for h in holders {
            let family = families.iter().find(|f| f.id == h.family_id);
            let rob_name = h
                .rob_id
                .as_ref()
                .and_then(|rob_id| robs.iter().find(|r| &r.id == rob_id))
                .map(|r| r.name.as_str())
                .unwrap_or("");

            let record = [
                h.id.clone(),
                h.name.clone(),
                family.map(|f| f.code.clone()).unwrap_or_default(),
                family.map(|f| f.name.clone()).unwrap_or_default(),
                h.status.to_string(),
                rob_name.to_string(),
                h.assigned_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                h.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ];
            writer.write_record(&record)?;
        }

        Self::finish(writer)
    }

    /// 渲染 ROB 集合
    pub fn render_robs(robs: &[Rob]) -> ExportResult<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(ROB_EXPORT_HEADERS)?;

        for r in robs {
            let record = [
                r.id.clone(),
                r.name.clone(),
                r.rob_type.to_string(),
                r.capacity.to_string(),
                r.current_load.to_string(),
                r.status.to_string(),
                r.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                r.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ];
            writer.write_record(&record)?;
        }

        Self::finish(writer)
    }

    fn finish(writer: csv::Writer<Vec<u8>>) -> ExportResult<String> {
        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Render(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExportError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FamilyStatus;
    use chrono::Utc;

    fn family(name: &str, code: &str, comment: &str) -> Family {
        let now = Utc::now();
        Family {
            id: "f1".to_string(),
            code: code.to_string(),
            name: name.to_string(),
            family_type: None,
            status: FamilyStatus::Active,
            description: String::new(),
            kits: 0,
            led: 0,
            goullet: 0,
            bcc_optosoft: 2,
            bcc_main: 1,
            rob_main: 0,
            rob_suite: 0,
            torque: 0,
            rack_30: 0,
            machine_visio: 0,
            comment: comment.to_string(),
            total_holders: 22,
            rob_assignments: Vec::new(),
            created_at: now,
            updated_at: now,
            created_by: "u".to_string(),
        }
    }

    #[test]
    fn test_render_families_quotes_embedded_delimiters() {
        let csv = CsvExporter::render_families(&[family(
            "VW BUMPER, FRONT",
            "VW-FB-699",
            "he said \"ok\"",
        )])
        .unwrap();

        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("Family Name,Family Code"));
        let row = lines.next().unwrap();
        assert!(row.contains("\"VW BUMPER, FRONT\""));
        assert!(row.contains("\"he said \"\"ok\"\"\""));
    }

    #[test]
    fn test_render_robs_headers() {
        let csv = CsvExporter::render_robs(&[]).unwrap();
        assert_eq!(
            csv.trim_end(),
            "ROB ID,ROB Name,Type,Capacity,Current Load,Status,Created At,Updated At"
        );
    }
}
