// ==========================================
// 产线工装管理系统 - 内存数据集
// ==========================================
// 红线: 数据集是唯一事实层,集合只经仓储/引擎修改
// 并发契约: 单一互斥点（Arc<Mutex<DataSet>>）,
//           跨 Holder/Rob 两侧的写入在同一临界区内完成,
//           保证同一 ROB 上的分配操作可串行化
// 顺序契约: Vec 保持插入顺序,导出与校验因此可确定
// ==========================================

use crate::domain::{AuditLog, Family, Holder, Rob};
use crate::store::error::{StoreError, StoreResult};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// DataSet - 实体集合
// ==========================================
#[derive(Debug, Default)]
pub struct DataSet {
    pub families: Vec<Family>,
    pub holders: Vec<Holder>,
    pub robs: Vec<Rob>,
    pub audit_logs: Vec<AuditLog>, // 仅追加
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== 查找辅助（内部索引为线性查找,集合规模受 UI 使用约束）=====

    pub fn family_by_id(&self, id: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.id == id)
    }

    pub fn family_by_code(&self, code: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.code == code)
    }

    pub fn holder_by_id(&self, id: &str) -> Option<&Holder> {
        self.holders.iter().find(|h| h.id == id)
    }

    pub fn holder_by_id_mut(&mut self, id: &str) -> Option<&mut Holder> {
        self.holders.iter_mut().find(|h| h.id == id)
    }

    pub fn rob_by_id(&self, id: &str) -> Option<&Rob> {
        self.robs.iter().find(|r| r.id == id)
    }

    pub fn rob_by_id_mut(&mut self, id: &str) -> Option<&mut Rob> {
        self.robs.iter_mut().find(|r| r.id == id)
    }

    /// 生成只读快照键集（导入校验用: 唯一性/外键存在性检查）
    ///
    /// 校验器只读快照,从不触碰活动集合
    pub fn snapshot(&self) -> DatasetSnapshot {
        DatasetSnapshot {
            family_codes: self.families.iter().map(|f| f.code.clone()).collect(),
            family_id_by_code: self
                .families
                .iter()
                .map(|f| (f.code.clone(), f.id.clone()))
                .collect(),
            holder_ids: self.holders.iter().map(|h| h.id.clone()).collect(),
            rob_ids: self.robs.iter().map(|r| r.id.clone()).collect(),
        }
    }

    /// 全量一致性检查（测试/调试用）
    ///
    /// 校验两侧关系: holder.rob_id 与 rob.assigned_holders 互为镜像,
    /// 且每个 ROB 的负载账目正确
    pub fn check_invariants(&self) -> StoreResult<()> {
        for rob in &self.robs {
            if !rob.is_consistent() {
                return Err(StoreError::InternalError(format!(
                    "ROB {} 账目不一致: current_load={} assigned={} capacity={}",
                    rob.id,
                    rob.current_load,
                    rob.assigned_holders.len(),
                    rob.capacity
                )));
            }
            for holder_id in &rob.assigned_holders {
                match self.holder_by_id(holder_id) {
                    Some(h) if h.rob_id.as_deref() == Some(rob.id.as_str()) => {}
                    _ => {
                        return Err(StoreError::InternalError(format!(
                            "ROB {} 的分配列表包含未回指的工装 {}",
                            rob.id, holder_id
                        )))
                    }
                }
            }
        }
        for holder in &self.holders {
            if !holder.is_consistent() {
                return Err(StoreError::InternalError(format!(
                    "工装 {} 状态与分配引用不同步: status={} rob_id={:?}",
                    holder.id, holder.status, holder.rob_id
                )));
            }
            if let Some(rob_id) = &holder.rob_id {
                let listed = self
                    .rob_by_id(rob_id)
                    .map(|r| r.assigned_holders.iter().any(|id| id == &holder.id))
                    .unwrap_or(false);
                if !listed {
                    return Err(StoreError::InternalError(format!(
                        "工装 {} 指向的 ROB {} 未在分配列表中登记",
                        holder.id, rob_id
                    )));
                }
            }
        }
        Ok(())
    }
}

// ==========================================
// DatasetSnapshot - 只读键集快照
// ==========================================
// 用途: 导入校验（纯函数输入之一）
#[derive(Debug, Clone, Default)]
pub struct DatasetSnapshot {
    pub family_codes: HashSet<String>,
    pub family_id_by_code: HashMap<String, String>,
    pub holder_ids: HashSet<String>,
    pub rob_ids: HashSet<String>,
}

/// 共享数据集句柄
pub type SharedDataSet = Arc<Mutex<DataSet>>;

/// 创建空的共享数据集
pub fn new_shared_dataset() -> SharedDataSet {
    Arc::new(Mutex::new(DataSet::new()))
}

/// 统一的加锁入口（毒锁转换为 LockError）
pub fn lock_dataset(data: &SharedDataSet) -> StoreResult<MutexGuard<'_, DataSet>> {
    data.lock()
        .map_err(|e| StoreError::LockError(e.to_string()))
}
