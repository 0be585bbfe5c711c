// ==========================================
// 产线工装管理系统 - 审计日志仓储
// ==========================================
// 红线: 仅追加,不提供更新/删除入口
// ==========================================

use crate::domain::types::AuditOperation;
use crate::domain::AuditLog;
use crate::store::dataset::{lock_dataset, SharedDataSet};
use crate::store::error::StoreResult;
use serde::Serialize;

// ==========================================
// AuditLogRepository - 审计日志仓储
// ==========================================
pub struct AuditLogRepository {
    data: SharedDataSet,
}

impl AuditLogRepository {
    pub fn new(data: SharedDataSet) -> Self {
        Self { data }
    }

    /// 追加一条审计记录
    pub fn append(&self, log: AuditLog) -> StoreResult<()> {
        let mut data = lock_dataset(&self.data)?;
        data.audit_logs.push(log);
        Ok(())
    }

    /// 记录一次实体变更（快照序列化失败按 None 落账,不阻断主操作）
    pub fn record_change<T: Serialize>(
        &self,
        table_name: &str,
        operation: AuditOperation,
        old_data: Option<&T>,
        new_data: Option<&T>,
        actor: &str,
    ) -> StoreResult<()> {
        let old_json = old_data.and_then(|v| serde_json::to_value(v).ok());
        let new_json = new_data.and_then(|v| serde_json::to_value(v).ok());
        self.append(AuditLog::record(
            table_name, operation, old_json, new_json, actor,
        ))
    }

    /// 最近 N 条（新在前,展示用）
    pub fn list_recent(&self, limit: usize) -> StoreResult<Vec<AuditLog>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.audit_logs.iter().rev().take(limit).cloned().collect())
    }

    /// 按实体集合名过滤
    pub fn list_by_table(&self, table_name: &str) -> StoreResult<Vec<AuditLog>> {
        let data = lock_dataset(&self.data)?;
        Ok(data
            .audit_logs
            .iter()
            .filter(|l| l.table_name == table_name)
            .cloned()
            .collect())
    }

    pub fn count(&self) -> StoreResult<usize> {
        let data = lock_dataset(&self.data)?;
        Ok(data.audit_logs.len())
    }
}
