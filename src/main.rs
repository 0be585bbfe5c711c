// ==========================================
// 产线工装管理系统 - 命令行入口
// ==========================================
// 职责: 薄封装,对指定文件执行一次导入校验并打印报告
// 用法: fixture-console <file.csv|file.xlsx>
// ==========================================

use anyhow::Context;
use fixture_console::importer::{CancelFlag, ImportService, ImportServiceImpl};
use fixture_console::{config::ConsoleConfig, logging, new_shared_dataset};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", fixture_console::APP_NAME);
    tracing::info!("系统版本: {}", fixture_console::VERSION);
    tracing::info!("==================================================");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("用法: fixture-console <file.csv|file.xlsx>")?;

    let config = ConsoleConfig::load_or_default();
    let data = new_shared_dataset();
    let service = ImportServiceImpl::new(data, config.import);

    let cancel = CancelFlag::new();
    let report = service.validate_file(&path, &cancel).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
