// ==========================================
// 产线工装管理系统 - 工装夹具 API
// ==========================================
// 职责: 工装生命周期与分配操作入口,权限把关
// 红线: 全部写路径委托分配引擎,本层不直接触碰集合
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::actor::permissions;
use crate::domain::types::HolderStatus;
use crate::domain::{ActorContext, Holder, NewHolder, PermissionChecker, Rob};
use crate::engine::AssignmentEngine;
use crate::store::dataset::SharedDataSet;
use crate::store::HolderRepository;
use std::sync::Arc;

// ==========================================
// HolderApi - 工装夹具接口
// ==========================================
pub struct HolderApi {
    holders: HolderRepository,
    engine: AssignmentEngine,
    permissions: Arc<dyn PermissionChecker>,
}

impl HolderApi {
    pub fn new(data: SharedDataSet, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            holders: HolderRepository::new(data.clone()),
            engine: AssignmentEngine::new(data),
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

    /// 创建工装
    pub fn create(&self, new: NewHolder, actor: &ActorContext) -> ApiResult<Holder> {
        self.require(permissions::MANAGE_HOLDERS)?;
        Ok(self.engine.create_holder(new, actor)?)
    }

    /// 删除工装（已分配的先释放 ROB 容量）
    pub fn delete(&self, id: &str, actor: &ActorContext) -> ApiResult<Holder> {
        self.require(permissions::MANAGE_HOLDERS)?;
        Ok(self.engine.delete_holder(id, actor)?)
    }

    /// 分配到 ROB 工作站
    pub fn assign(
        &self,
        holder_id: &str,
        rob_id: &str,
        actor: &ActorContext,
    ) -> ApiResult<(Holder, Rob)> {
        self.require(permissions::MANAGE_HOLDERS)?;
        Ok(self.engine.assign(holder_id, rob_id, actor)?)
    }

    /// 解除分配（未分配时为幂等空操作）
    pub fn unassign(&self, holder_id: &str, actor: &ActorContext) -> ApiResult<Holder> {
        self.require(permissions::MANAGE_HOLDERS)?;
        Ok(self.engine.unassign(holder_id, actor)?)
    }

    /// 状态流转（允许范围见分配引擎）
    pub fn set_status(
        &self,
        holder_id: &str,
        status: HolderStatus,
        actor: &ActorContext,
    ) -> ApiResult<Holder> {
        self.require(permissions::MANAGE_HOLDERS)?;
        Ok(self.engine.set_holder_status(holder_id, status, actor)?)
    }

    /// 按ID查询（不存在报 NotFound）
    pub fn get(&self, id: &str) -> ApiResult<Holder> {
        self.holders
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Holder(id={})不存在", id)))
    }

    pub fn list(&self) -> ApiResult<Vec<Holder>> {
        Ok(self.holders.list()?)
    }

    pub fn list_by_family(&self, family_id: &str) -> ApiResult<Vec<Holder>> {
        Ok(self.holders.list_by_family(family_id)?)
    }

    pub fn list_by_status(&self, status: HolderStatus) -> ApiResult<Vec<Holder>> {
        Ok(self.holders.list_by_status(status)?)
    }
}
