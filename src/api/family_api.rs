// ==========================================
// 产线工装管理系统 - 产品族 API
// ==========================================
// 职责: 产品族 CRUD,权限把关 + 审计落账
// 约定: 删除不级联工装（悬空 family_id 是文档化的接受行为,
//       仅告警提示）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::actor::permissions;
use crate::domain::types::AuditOperation;
use crate::domain::{ActorContext, Family, FamilyPatch, NewFamily, PermissionChecker};
use crate::store::dataset::SharedDataSet;
use crate::store::{AuditLogRepository, FamilyRepository, HolderRepository};
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// FamilyApi - 产品族接口
// ==========================================
pub struct FamilyApi {
    families: FamilyRepository,
    holders: HolderRepository,
    audit: AuditLogRepository,
    permissions: Arc<dyn PermissionChecker>,
}

impl FamilyApi {
    pub fn new(data: SharedDataSet, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            families: FamilyRepository::new(data.clone()),
            holders: HolderRepository::new(data.clone()),
            audit: AuditLogRepository::new(data),
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

    /// 创建产品族
    pub fn create(&self, new: NewFamily, actor: &ActorContext) -> ApiResult<Family> {
        self.require(permissions::MANAGE_FAMILIES)?;

        let family = self.families.insert(new, &actor.actor_id)?;
        self.audit.record_change(
            "families",
            AuditOperation::Create,
            None,
            Some(&family),
            &actor.actor_id,
        )?;

        info!(family_id = %family.id, code = %family.code, "产品族已创建");
        Ok(family)
    }

    /// 部分更新产品族
    pub fn update(
        &self,
        id: &str,
        patch: &FamilyPatch,
        actor: &ActorContext,
    ) -> ApiResult<Family> {
        self.require(permissions::MANAGE_FAMILIES)?;

        let (before, after) = self.families.update(id, patch)?;
        self.audit.record_change(
            "families",
            AuditOperation::Update,
            Some(&before),
            Some(&after),
            &actor.actor_id,
        )?;

        info!(family_id = %id, "产品族已更新");
        Ok(after)
    }

    /// 删除产品族
    pub fn delete(&self, id: &str, actor: &ActorContext) -> ApiResult<Family> {
        self.require(permissions::MANAGE_FAMILIES)?;

        // 不级联: 仍有工装引用时放行但告警
        let referencing = self.holders.list_by_family(id)?;
        if !referencing.is_empty() {
            warn!(
                family_id = %id,
                holder_count = referencing.len(),
                "删除仍被工装引用的产品族,引用将悬空"
            );
        }

        let removed = self.families.remove(id)?;
        self.audit.record_change(
            "families",
            AuditOperation::Delete,
            Some(&removed),
            None,
            &actor.actor_id,
        )?;

        info!(family_id = %id, "产品族已删除");
        Ok(removed)
    }

    /// 按ID查询（不存在报 NotFound）
    pub fn get(&self, id: &str) -> ApiResult<Family> {
        self.families
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Family(id={})不存在", id)))
    }

    /// 按业务编码查询
    pub fn get_by_code(&self, code: &str) -> ApiResult<Family> {
        self.families
            .find_by_code(code)?
            .ok_or_else(|| ApiError::NotFound(format!("Family(code={})不存在", code)))
    }

    pub fn list(&self) -> ApiResult<Vec<Family>> {
        Ok(self.families.list()?)
    }
}
