// ==========================================
// 产线工装管理系统 - 测试数据生成器
// ==========================================
// 职责: 生成导入模板与示例导入文件,供手工验证使用
// 用法: cargo run --bin generate_test_data [输出目录]
// ==========================================

use fixture_console::exporter::templates;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    fixture_console::logging::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("test_data"));
    std::fs::create_dir_all(&out_dir)?;

    // 三类导入模板
    std::fs::write(out_dir.join("families_template.csv"), templates::family_template()?)?;
    std::fs::write(out_dir.join("holders_template.csv"), templates::holder_template()?)?;
    std::fs::write(out_dir.join("robs_template.csv"), templates::rob_template()?)?;

    // 带坏行的示例文件（演示逐行报错）
    let with_errors = "\
Family Name,Family Code,Type,Status,KITs
VW FRONT BUMPER 699,VW-FB-699,Front Bumper,active,0
SK FRONT BUMPER 702,,Front Bumper,active,0
TAILGATE COMBI 698,TG-CB-698,Tailgate,broken,abc
";
    std::fs::write(out_dir.join("families_with_errors.csv"), with_errors)?;

    tracing::info!(dir = %out_dir.display(), "测试数据已生成");
    Ok(())
}
