// ==========================================
// 产线工装管理系统 - 导入 API
// ==========================================
// 职责: 导入校验/应用入口
// 约定: 校验只读,开放调用; 应用改写数据集,受权限把关
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfig;
use crate::domain::actor::permissions;
use crate::domain::{ActorContext, PermissionChecker};
use crate::importer::{
    ApplyOutcome, CancelFlag, ImportReport, ImportService, ImportServiceImpl,
};
use crate::store::dataset::SharedDataSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ==========================================
// ImportApi - 导入接口
// ==========================================
pub struct ImportApi {
    service: ImportServiceImpl,
    permissions: Arc<dyn PermissionChecker>,
}

impl ImportApi {
    pub fn new(
        data: SharedDataSet,
        config: ImportConfig,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        Self {
            service: ImportServiceImpl::new(data, config),
            permissions,
        }
    }

    fn require(&self, permission: &str) -> ApiResult<()> {
        if self.permissions.has_permission(permission) {
            Ok(())
        } else {
            Err(ApiError::PermissionDenied {
                permission: permission.to_string(),
            })
        }
    }

    /// 校验文件（只读,不落账）
    pub async fn validate_file(
        &self,
        path: &Path,
        cancel: &CancelFlag,
    ) -> ApiResult<ImportReport> {
        Ok(self.service.validate_file(path, cancel).await?)
    }

    /// 校验内存文本（只读,不落账）
    pub async fn validate_text(
        &self,
        content: &str,
        cancel: &CancelFlag,
    ) -> ApiResult<ImportReport> {
        Ok(self.service.validate_text(content, cancel).await?)
    }

    /// 应用已通过校验的行（改写数据集,需要 import_data 权限）
    pub async fn apply(
        &self,
        report: &ImportReport,
        actor: &ActorContext,
    ) -> ApiResult<ApplyOutcome> {
        self.require(permissions::IMPORT_DATA)?;
        Ok(self.service.apply(report, actor).await?)
    }

    /// 批量校验（并发,单个失败不影响其他）
    pub async fn batch_validate(
        &self,
        paths: Vec<PathBuf>,
    ) -> Vec<Result<ImportReport, String>> {
        self.service.batch_validate(paths).await
    }
}
