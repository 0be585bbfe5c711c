// ==========================================
// 产线工装管理系统 - ROB 工作站 API
// ==========================================
// 职责: ROB 生命周期入口,权限把关
// 红线: 全部写路径委托分配引擎; ROB 无删除操作
//       （容量账目随工装释放回收,工作站只停用不销账）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::actor::permissions;
use crate::domain::types::RobType;
use crate::domain::{ActorContext, NewRob, PermissionChecker, Rob, RobPatch};
use crate::engine::AssignmentEngine;
use crate::store::dataset::SharedDataSet;
use crate::store::RobRepository;
use std::sync::Arc;

// ==========================================
// RobApi - ROB 工作站接口
// ==========================================
pub struct RobApi {
    robs: RobRepository,
    engine: AssignmentEngine,
    permissions: Arc<dyn PermissionChecker>,
}

impl RobApi {
    pub fn new(data: SharedDataSet, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            robs: RobRepository::new(data.clone()),
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

    /// 创建 ROB 工作站（负载从 0 起账）
    pub fn create(&self, new: NewRob, actor: &ActorContext) -> ApiResult<Rob> {
        self.require(permissions::MANAGE_ROBS)?;
        Ok(self.engine.create_rob(new, actor)?)
    }

    /// 部分更新（type 不可变; 容量不得低于当前负载）
    pub fn update(&self, id: &str, patch: &RobPatch, actor: &ActorContext) -> ApiResult<Rob> {
        self.require(permissions::MANAGE_ROBS)?;
        Ok(self.engine.update_rob(id, patch, actor)?)
    }

    /// 按ID查询（不存在报 NotFound）
    pub fn get(&self, id: &str) -> ApiResult<Rob> {
        self.robs
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Rob(id={})不存在", id)))
    }

    pub fn list(&self) -> ApiResult<Vec<Rob>> {
        Ok(self.robs.list()?)
    }

    pub fn list_by_type(&self, rob_type: RobType) -> ApiResult<Vec<Rob>> {
        Ok(self.robs.list_by_type(rob_type)?)
    }

    /// 可接收分配的工作站（Active 且有剩余容量）
    pub fn list_assignable(&self) -> ApiResult<Vec<Rob>> {
        Ok(self.robs.list_assignable()?)
    }
}
