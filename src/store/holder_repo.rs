// ==========================================
// 产线工装管理系统 - 工装夹具仓储（只读）
// ==========================================
// 红线: 工装集合的写入全部收口在 AssignmentEngine,
//       仓储只提供查询,避免绕过双侧一致性维护
// ==========================================

use crate::domain::types::HolderStatus;
use crate::domain::Holder;
use crate::store::dataset::{lock_dataset, SharedDataSet};
use crate::store::error::StoreResult;

// ==========================================
// HolderRepository - 工装夹具仓储
// ==========================================
pub struct HolderRepository {
    data: SharedDataSet,
}

impl HolderRepository {
    pub fn new(data: SharedDataSet) -> Self {
        Self { data }
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Holder>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.holder_by_id(id).cloned())
    }

    /// 全量列表（保持插入顺序）
    pub fn list(&self) -> StoreResult<Vec<Holder>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.holders.clone())
    }

    /// 按所属产品族过滤
    pub fn list_by_family(&self, family_id: &str) -> StoreResult<Vec<Holder>> {
        let data = lock_dataset(&self.data)?;
        Ok(data
            .holders
            .iter()
            .filter(|h| h.family_id == family_id)
            .cloned()
            .collect())
    }

    /// 按状态过滤
    pub fn list_by_status(&self, status: HolderStatus) -> StoreResult<Vec<Holder>> {
        let data = lock_dataset(&self.data)?;
        Ok(data
            .holders
            .iter()
            .filter(|h| h.status == status)
            .cloned()
            .collect())
    }

    pub fn count(&self) -> StoreResult<usize> {
        let data = lock_dataset(&self.data)?;
        Ok(data.holders.len())
    }
}
