// ==========================================
// 产线工装管理系统 - 仪表盘 API
// ==========================================
// 职责: 汇总指标与最近操作记录（只读）
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::types::{FamilyStatus, RobType};
use crate::domain::AuditLog;
use crate::store::dataset::{lock_dataset, SharedDataSet};
use serde::{Deserialize, Serialize};

// ==========================================
// Kpis - 汇总指标
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpis {
    pub total_families: usize,
    pub active_families: usize,
    /// 工装总数（按产品族冗余计数 total_holders 求和的口径）
    pub total_holders: i64,
    /// ROB 总体利用率（负载/容量,四舍五入为整数百分比）
    pub rob_utilization: u32,
    pub serial_robs: usize,
    pub mpr_robs: usize,
    pub myc_robs: usize,
}

// ==========================================
// DashboardApi - 仪表盘接口
// ==========================================
pub struct DashboardApi {
    data: SharedDataSet,
}

impl DashboardApi {
    pub fn new(data: SharedDataSet) -> Self {
        Self { data }
    }

    /// 计算汇总指标
    pub fn kpis(&self) -> ApiResult<Kpis> {
        let data = lock_dataset(&self.data)?;

        let total_capacity: u64 = data.robs.iter().map(|r| r.capacity as u64).sum();
        let total_load: u64 = data.robs.iter().map(|r| r.current_load as u64).sum();
        let rob_utilization = if total_capacity > 0 {
            ((total_load as f64 / total_capacity as f64) * 100.0).round() as u32
        } else {
            0
        };

        Ok(Kpis {
            total_families: data.families.len(),
            active_families: data
                .families
                .iter()
                .filter(|f| f.status == FamilyStatus::Active)
                .count(),
            total_holders: data.families.iter().map(|f| f.total_holders).sum(),
            rob_utilization,
            serial_robs: data
                .robs
                .iter()
                .filter(|r| r.rob_type == RobType::Serial)
                .count(),
            mpr_robs: data
                .robs
                .iter()
                .filter(|r| r.rob_type == RobType::Mpr)
                .count(),
            myc_robs: data
                .robs
                .iter()
                .filter(|r| r.rob_type == RobType::Myc)
                .count(),
        })
    }

    /// 最近操作记录（新在前）
    pub fn recent_activity(&self, limit: usize) -> ApiResult<Vec<AuditLog>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.audit_logs.iter().rev().take(limit).cloned().collect())
    }
}
