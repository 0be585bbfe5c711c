// ==========================================
// 产线工装管理系统 - 系统配置
// ==========================================
// 职责: 运行参数集中管理,默认值内置,
//       可从 JSON 配置文件覆写
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

// ==========================================
// ImportConfig - 导入参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// 报告内展示的错误条数上限（完整错误保留在被拒行里）
    pub max_display_errors: usize,
    /// 每校验多少行让出一次调度权（0 = 不让出）
    pub yield_every_rows: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_display_errors: 10,
            yield_every_rows: 1,
        }
    }
}

// ==========================================
// ConsoleConfig - 系统配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub import: ImportConfig,
    /// 未提供操作人上下文时的审计归属
    #[serde(default = "default_actor")]
    pub default_actor: String,
}

fn default_actor() -> String {
    "system".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            import: ImportConfig::default(),
            default_actor: default_actor(),
        }
    }
}

impl ConsoleConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: ConsoleConfig =
            serde_json::from_str(&content).with_context(|| "配置文件格式错误")?;
        info!(path = %path.display(), "配置已加载");
        Ok(config)
    }

    /// 默认配置文件位置（跟随系统配置目录）
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fixture-console").join("config.json"))
    }

    /// 默认位置存在则加载,否则使用内置默认值
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "配置加载失败,回退到默认配置");
                Self::default()
            }),
            _ => Self::default(),
        }
    }
}
