// ==========================================
// 产线工装管理系统 - ROB 工作站仓储（只读）
// ==========================================
// 红线: ROB 集合的写入全部收口在 AssignmentEngine,
//       仓储只提供查询,避免绕过容量账目维护
// ==========================================

use crate::domain::types::{RobStatus, RobType};
use crate::domain::Rob;
use crate::store::dataset::{lock_dataset, SharedDataSet};
use crate::store::error::StoreResult;

// ==========================================
// RobRepository - ROB 工作站仓储
// ==========================================
pub struct RobRepository {
    data: SharedDataSet,
}

impl RobRepository {
    pub fn new(data: SharedDataSet) -> Self {
        Self { data }
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Rob>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.rob_by_id(id).cloned())
    }

    /// 全量列表（保持插入顺序）
    pub fn list(&self) -> StoreResult<Vec<Rob>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.robs.clone())
    }

    /// 按类型过滤
    pub fn list_by_type(&self, rob_type: RobType) -> StoreResult<Vec<Rob>> {
        let data = lock_dataset(&self.data)?;
        Ok(data
            .robs
            .iter()
            .filter(|r| r.rob_type == rob_type)
            .cloned()
            .collect())
    }

    /// 可接收分配的 ROB（状态 Active 且有剩余容量）
    pub fn list_assignable(&self) -> StoreResult<Vec<Rob>> {
        let data = lock_dataset(&self.data)?;
        Ok(data
            .robs
            .iter()
            .filter(|r| r.status == RobStatus::Active && r.has_capacity())
            .cloned()
            .collect())
    }

    pub fn count(&self) -> StoreResult<usize> {
        let data = lock_dataset(&self.data)?;
        Ok(data.robs.len())
    }
}
