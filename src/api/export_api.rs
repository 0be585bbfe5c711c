// ==========================================
// 产线工装管理系统 - 导出 API
// ==========================================
// 职责: 实体集合导出与模板下载入口,权限把关
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::actor::permissions;
use crate::domain::PermissionChecker;
use crate::exporter::{templates, CsvExporter};
use crate::store::dataset::SharedDataSet;
use crate::store::{FamilyRepository, HolderRepository, RobRepository};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// 导出文件默认名
pub const FAMILIES_EXPORT_FILENAME: &str = "families_export.csv";
pub const HOLDERS_EXPORT_FILENAME: &str = "holders_export.csv";
pub const ROBS_EXPORT_FILENAME: &str = "robs_export.csv";

// ==========================================
// ExportApi - 导出接口
// ==========================================
pub struct ExportApi {
    families: FamilyRepository,
    holders: HolderRepository,
    robs: RobRepository,
    permissions: Arc<dyn PermissionChecker>,
}

impl ExportApi {
    pub fn new(data: SharedDataSet, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            families: FamilyRepository::new(data.clone()),
            holders: HolderRepository::new(data.clone()),
            robs: RobRepository::new(data),
            permissions,
        }
    }

    fn require(&self) -> ApiResult<()> {
        if self.permissions.has_permission(permissions::EXPORT_DATA) {
            Ok(())
        } else {
            Err(ApiError::PermissionDenied {
                permission: permissions::EXPORT_DATA.to_string(),
            })
        }
    }

    /// 导出产品族集合为 CSV 文本
    pub fn export_families(&self) -> ApiResult<String> {
        self.require()?;
        let families = self.families.list()?;
        Ok(CsvExporter::render_families(&families)?)
    }

    /// 导出工装集合为 CSV 文本
    pub fn export_holders(&self) -> ApiResult<String> {
        self.require()?;
        let holders = self.holders.list()?;
        let families = self.families.list()?;
        let robs = self.robs.list()?;
        Ok(CsvExporter::render_holders(&holders, &families, &robs)?)
    }

    /// 导出 ROB 集合为 CSV 文本
    pub fn export_robs(&self) -> ApiResult<String> {
        self.require()?;
        let robs = self.robs.list()?;
        Ok(CsvExporter::render_robs(&robs)?)
    }

    /// 写出到文件
    pub fn export_to_file(&self, content: &str, path: &Path) -> ApiResult<()> {
        self.require()?;
        std::fs::write(path, content)
            .map_err(|e| ApiError::ExportError(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "导出文件已写出");
        Ok(())
    }

    // ===== 模板（无需权限,只含示例数据）=====

    pub fn family_template(&self) -> ApiResult<String> {
        Ok(templates::family_template()?)
    }

    pub fn holder_template(&self) -> ApiResult<String> {
        Ok(templates::holder_template()?)
    }

    pub fn rob_template(&self) -> ApiResult<String> {
        Ok(templates::rob_template()?)
    }
}
