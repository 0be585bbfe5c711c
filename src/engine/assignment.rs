// ==========================================
// 产线工装管理系统 - 分配引擎
// ==========================================
// 红线: 本引擎是 Holder/Rob 两侧关系的唯一写者
// 红线: 容量约束优先,满容立即失败,不排队等待
// 并发契约: 每个操作在同一临界区内完成两侧写入与审计,
//           对同一 ROB 的分配操作天然可串行化,
//           两个并发 assign 不可能同时吃掉最后一个容量单位
// ==========================================

use crate::domain::types::{AuditOperation, HolderStatus, RobStatus};
use crate::domain::{ActorContext, AuditLog, Holder, NewHolder, NewRob, Rob, RobPatch};
use crate::store::dataset::{lock_dataset, DataSet, SharedDataSet};
use crate::store::error::{StoreError, StoreResult};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// AssignmentEngine - 分配引擎
// ==========================================
pub struct AssignmentEngine {
    data: SharedDataSet,
}

impl AssignmentEngine {
    pub fn new(data: SharedDataSet) -> Self {
        Self { data }
    }

    // ==========================================
    // 分配 / 解除分配
    // ==========================================

    /// 将工装分配到 ROB 工作站
    ///
    /// # 前置条件
    /// - 工装存在且状态为 Available
    /// - ROB 存在、状态为 Active、有剩余容量
    ///
    /// # 效果（单临界区内原子完成）
    /// - holder: status=Assigned, rob_id, assigned_at
    /// - rob: current_load+1, assigned_holders 追加, updated_at
    ///
    /// # 失败
    /// - NotFound / InvalidStateTransition / InvalidState / CapacityExceeded
    pub fn assign(
        &self,
        holder_id: &str,
        rob_id: &str,
        actor: &ActorContext,
    ) -> StoreResult<(Holder, Rob)> {
        let mut data = lock_dataset(&self.data)?;

        // 前置检查全部在持锁状态下完成,检查与写入之间没有窗口
        let holder = data
            .holder_by_id(holder_id)
            .ok_or_else(|| StoreError::not_found("Holder", holder_id))?;

        if holder.status != HolderStatus::Available {
            return Err(StoreError::InvalidStateTransition {
                entity: "Holder".to_string(),
                from: holder.status.to_string(),
                to: HolderStatus::Assigned.to_string(),
            });
        }

        let rob = data
            .rob_by_id(rob_id)
            .ok_or_else(|| StoreError::not_found("Rob", rob_id))?;

        if rob.status != RobStatus::Active {
            return Err(StoreError::InvalidState(format!(
                "ROB {} 状态为 {},仅 active 状态可接收分配",
                rob_id, rob.status
            )));
        }

        if !rob.has_capacity() {
            return Err(StoreError::CapacityExceeded {
                rob_id: rob_id.to_string(),
                capacity: rob.capacity,
            });
        }

        let now = Utc::now();

        // 写工装侧
        let holder_before = holder.clone();
        let holder = data
            .holder_by_id_mut(holder_id)
            .expect("存在性已在前置检查确认");
        holder.status = HolderStatus::Assigned;
        holder.rob_id = Some(rob_id.to_string());
        holder.assigned_at = Some(now);
        let holder_after = holder.clone();

        // 写 ROB 侧
        let rob = data
            .rob_by_id_mut(rob_id)
            .expect("存在性已在前置检查确认");
        let rob_before = rob.clone();
        rob.current_load += 1;
        rob.assigned_holders.push(holder_id.to_string());
        rob.updated_at = now;
        let rob_after = rob.clone();

        Self::audit(&mut data, "holders", &holder_before, &holder_after, actor);
        Self::audit(&mut data, "robs", &rob_before, &rob_after, actor);

        debug_assert!(data.check_invariants().is_ok());
        info!(
            holder_id = %holder_id,
            rob_id = %rob_id,
            current_load = rob_after.current_load,
            capacity = rob_after.capacity,
            "工装分配完成"
        );
        Ok((holder_after, rob_after))
    }

    /// 解除工装的 ROB 分配
    ///
    /// 未分配时为幂等空操作（文档化选择: 返回 Ok,不报错）,
    /// 连续两次 unassign 与一次的终态一致
    pub fn unassign(&self, holder_id: &str, actor: &ActorContext) -> StoreResult<Holder> {
        let mut data = lock_dataset(&self.data)?;

        let holder = data
            .holder_by_id(holder_id)
            .ok_or_else(|| StoreError::not_found("Holder", holder_id))?;

        if holder.rob_id.is_none() {
            debug!(holder_id = %holder_id, "工装未分配,解除操作按空操作处理");
            return Ok(holder.clone());
        }

        let holder_after = Self::release_assignment(&mut data, holder_id, actor)?;

        debug_assert!(data.check_invariants().is_ok());
        info!(holder_id = %holder_id, "工装分配已解除");
        Ok(holder_after)
    }

    // ==========================================
    // 工装生命周期
    // ==========================================

    /// 创建工装
    ///
    /// # 约束
    /// - 所属产品族必须存在
    /// - 指定ID时不得与现存工装冲突
    /// - 初始状态不得为 Assigned（分配必须走 assign）
    pub fn create_holder(&self, new: NewHolder, actor: &ActorContext) -> StoreResult<Holder> {
        let mut data = lock_dataset(&self.data)?;

        if new.status == HolderStatus::Assigned {
            return Err(StoreError::InvalidState(
                "不允许直接创建已分配状态的工装,请创建后执行 assign".to_string(),
            ));
        }

        if data.family_by_id(&new.family_id).is_none() {
            return Err(StoreError::not_found("Family", &new.family_id));
        }

        let id = match new.id {
            Some(id) => {
                if data.holder_by_id(&id).is_some() {
                    return Err(StoreError::duplicate_key("Holder", "id", &id));
                }
                id
            }
            None => Uuid::new_v4().to_string(),
        };

        let holder = Holder {
            id,
            name: new.name,
            family_id: new.family_id,
            status: new.status,
            rob_id: None,
            assigned_at: None,
            created_at: Utc::now(),
        };

        data.holders.push(holder.clone());
        data.audit_logs.push(AuditLog::record(
            "holders",
            AuditOperation::Create,
            None,
            serde_json::to_value(&holder).ok(),
            &actor.actor_id,
        ));

        info!(holder_id = %holder.id, family_id = %holder.family_id, "工装已创建");
        Ok(holder)
    }

    /// 删除工装
    ///
    /// 若当前已分配,先执行解除分配效果（释放 ROB 容量账目）,
    /// 再移除记录,避免容量账目成为孤账
    pub fn delete_holder(&self, holder_id: &str, actor: &ActorContext) -> StoreResult<Holder> {
        let mut data = lock_dataset(&self.data)?;

        let holder = data
            .holder_by_id(holder_id)
            .ok_or_else(|| StoreError::not_found("Holder", holder_id))?;

        if holder.rob_id.is_some() {
            warn!(holder_id = %holder_id, rob_id = ?holder.rob_id, "删除已分配工装,先释放容量");
            Self::release_assignment(&mut data, holder_id, actor)?;
        }

        let pos = data
            .holders
            .iter()
            .position(|h| h.id == holder_id)
            .expect("存在性已在前置检查确认");
        let removed = data.holders.remove(pos);

        data.audit_logs.push(AuditLog::record(
            "holders",
            AuditOperation::Delete,
            serde_json::to_value(&removed).ok(),
            None,
            &actor.actor_id,
        ));

        debug_assert!(data.check_invariants().is_ok());
        info!(holder_id = %holder_id, "工装已删除");
        Ok(removed)
    }

    /// 工装状态流转
    ///
    /// 允许的转换:
    /// - Available ↔ Maintenance
    /// - 任意状态 → OutOfService（已分配的先释放容量）
    /// - 同状态 → 空操作
    ///
    /// 拒绝的转换（文档化选择,防止分配中的工装绕过容量释放）:
    /// - 任意 → Assigned（必须走 assign）
    /// - Assigned → Available / Maintenance（必须先 unassign）
    /// - OutOfService → 其他（停用为终态,仅可删除）
    pub fn set_holder_status(
        &self,
        holder_id: &str,
        target: HolderStatus,
        actor: &ActorContext,
    ) -> StoreResult<Holder> {
        let mut data = lock_dataset(&self.data)?;

        let holder = data
            .holder_by_id(holder_id)
            .ok_or_else(|| StoreError::not_found("Holder", holder_id))?;
        let current = holder.status;

        if current == target {
            return Ok(holder.clone());
        }

        let transition_err = || StoreError::InvalidStateTransition {
            entity: "Holder".to_string(),
            from: current.to_string(),
            to: target.to_string(),
        };

        match (current, target) {
            (_, HolderStatus::Assigned) => return Err(transition_err()),
            (HolderStatus::OutOfService, _) => return Err(transition_err()),
            (HolderStatus::Assigned, HolderStatus::OutOfService) => {
                // 停用已分配工装: 先释放容量,再停用
                Self::release_assignment(&mut data, holder_id, actor)?;
            }
            (HolderStatus::Assigned, _) => return Err(transition_err()),
            (HolderStatus::Available, HolderStatus::Maintenance)
            | (HolderStatus::Maintenance, HolderStatus::Available)
            | (_, HolderStatus::OutOfService) => {}
            _ => return Err(transition_err()),
        }

        let holder = data
            .holder_by_id_mut(holder_id)
            .expect("存在性已在前置检查确认");
        let before = holder.clone();
        holder.status = target;
        let after = holder.clone();

        Self::audit(&mut data, "holders", &before, &after, actor);

        debug_assert!(data.check_invariants().is_ok());
        info!(holder_id = %holder_id, from = %current, to = %target, "工装状态已变更");
        Ok(after)
    }

    // ==========================================
    // ROB 生命周期
    // ==========================================

    /// 创建 ROB 工作站
    ///
    /// 负载恒从 0 起账,分配列表恒为空
    pub fn create_rob(&self, new: NewRob, actor: &ActorContext) -> StoreResult<Rob> {
        let mut data = lock_dataset(&self.data)?;

        if new.capacity == 0 {
            return Err(StoreError::FieldValueError {
                field: "capacity".to_string(),
                message: "容量必须为正整数".to_string(),
            });
        }

        let id = match new.id {
            Some(id) => {
                if data.rob_by_id(&id).is_some() {
                    return Err(StoreError::duplicate_key("Rob", "id", &id));
                }
                id
            }
            None => Uuid::new_v4().to_string(),
        };

        let now = Utc::now();
        let rob = Rob {
            id,
            name: new.name,
            rob_type: new.rob_type,
            status: new.status,
            capacity: new.capacity,
            current_load: 0,
            assigned_holders: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        data.robs.push(rob.clone());
        data.audit_logs.push(AuditLog::record(
            "robs",
            AuditOperation::Create,
            None,
            serde_json::to_value(&rob).ok(),
            &actor.actor_id,
        ));

        info!(rob_id = %rob.id, rob_type = %rob.rob_type, capacity = rob.capacity, "ROB 已创建");
        Ok(rob)
    }

    /// 部分更新 ROB
    ///
    /// # 约束
    /// - type 为写一次字段,变更请求返回 ImmutableField（同值视为未变更）
    /// - 新容量低于当前负载时拒绝,否则会违反容量账目红线
    pub fn update_rob(
        &self,
        rob_id: &str,
        patch: &RobPatch,
        actor: &ActorContext,
    ) -> StoreResult<Rob> {
        let mut data = lock_dataset(&self.data)?;

        let rob = data
            .rob_by_id(rob_id)
            .ok_or_else(|| StoreError::not_found("Rob", rob_id))?;

        if let Some(requested) = patch.rob_type {
            if requested != rob.rob_type {
                return Err(StoreError::ImmutableField {
                    entity: "Rob".to_string(),
                    field: "type".to_string(),
                });
            }
        }

        if let Some(capacity) = patch.capacity {
            if capacity == 0 {
                return Err(StoreError::FieldValueError {
                    field: "capacity".to_string(),
                    message: "容量必须为正整数".to_string(),
                });
            }
            if capacity < rob.current_load {
                return Err(StoreError::InvalidState(format!(
                    "容量 {} 低于当前负载 {},请先解除分配",
                    capacity, rob.current_load
                )));
            }
        }

        let rob = data
            .rob_by_id_mut(rob_id)
            .expect("存在性已在前置检查确认");
        let before = rob.clone();
        if let Some(name) = &patch.name {
            rob.name = name.clone();
        }
        if let Some(capacity) = patch.capacity {
            rob.capacity = capacity;
        }
        if let Some(status) = patch.status {
            rob.status = status;
        }
        rob.updated_at = Utc::now();
        let after = rob.clone();

        Self::audit(&mut data, "robs", &before, &after, actor);

        debug_assert!(data.check_invariants().is_ok());
        info!(rob_id = %rob_id, "ROB 已更新");
        Ok(after)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 释放分配效果: 清空工装侧引用,回退 ROB 侧账目
    ///
    /// 调用方持锁; 工装必须存在且已分配
    fn release_assignment(
        data: &mut DataSet,
        holder_id: &str,
        actor: &ActorContext,
    ) -> StoreResult<Holder> {
        let holder = data
            .holder_by_id(holder_id)
            .ok_or_else(|| StoreError::not_found("Holder", holder_id))?;
        let rob_id = holder
            .rob_id
            .clone()
            .ok_or_else(|| StoreError::InvalidState(format!("工装 {} 未分配", holder_id)))?;

        let holder = data
            .holder_by_id_mut(holder_id)
            .expect("存在性已在前置检查确认");
        let holder_before = holder.clone();
        holder.status = HolderStatus::Available;
        holder.rob_id = None;
        holder.assigned_at = None;
        let holder_after = holder.clone();

        // ROB 侧可能已被删除（不应发生,容错处理并告警）
        if let Some(rob) = data.rob_by_id_mut(&rob_id) {
            let rob_before = rob.clone();
            rob.current_load = rob.current_load.saturating_sub(1);
            rob.assigned_holders.retain(|id| id != holder_id);
            rob.updated_at = Utc::now();
            let rob_after = rob.clone();
            Self::audit(data, "robs", &rob_before, &rob_after, actor);
        } else {
            warn!(holder_id = %holder_id, rob_id = %rob_id, "释放分配时 ROB 不存在,仅清理工装侧");
        }

        Self::audit(data, "holders", &holder_before, &holder_after, actor);
        Ok(holder_after)
    }

    /// 追加一条 UPDATE 审计记录（与主操作同临界区）
    fn audit<T: serde::Serialize>(
        data: &mut DataSet,
        table: &str,
        before: &T,
        after: &T,
        actor: &ActorContext,
    ) {
        data.audit_logs.push(AuditLog::record(
            table,
            AuditOperation::Update,
            serde_json::to_value(before).ok(),
            serde_json::to_value(after).ok(),
            &actor.actor_id,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{FamilyStatus, RobType};
    use crate::domain::NewFamily;
    use crate::store::dataset::new_shared_dataset;
    use crate::store::FamilyRepository;

    fn setup() -> (SharedDataSet, AssignmentEngine, ActorContext) {
        let data = new_shared_dataset();
        let engine = AssignmentEngine::new(data.clone());
        let actor = ActorContext::new("tester");

        let families = FamilyRepository::new(data.clone());
        families
            .insert(
                NewFamily::minimal("VW FRONT BUMPER 699", "VW-FB-699", FamilyStatus::Active),
                "tester",
            )
            .unwrap();

        (data, engine, actor)
    }

    fn family_id(data: &SharedDataSet) -> String {
        data.lock().unwrap().families[0].id.clone()
    }

    fn new_holder(data: &SharedDataSet, engine: &AssignmentEngine, actor: &ActorContext) -> Holder {
        engine
            .create_holder(NewHolder::available("H", &family_id(data)), actor)
            .unwrap()
    }

    #[test]
    fn test_assign_fills_capacity_then_fails() {
        let (data, engine, actor) = setup();
        let rob = engine
            .create_rob(NewRob::active("ROB-SERIAL-001", RobType::Serial, 2), &actor)
            .unwrap();

        let a = new_holder(&data, &engine, &actor);
        let b = new_holder(&data, &engine, &actor);
        let c = new_holder(&data, &engine, &actor);

        let (_, rob_after) = engine.assign(&a.id, &rob.id, &actor).unwrap();
        assert_eq!(rob_after.current_load, 1);
        let (_, rob_after) = engine.assign(&b.id, &rob.id, &actor).unwrap();
        assert_eq!(rob_after.current_load, 2);

        let err = engine.assign(&c.id, &rob.id, &actor).unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { .. }));

        // 失败不得改变账目
        let data = data.lock().unwrap();
        let rob = data.rob_by_id(&rob.id).unwrap();
        assert_eq!(rob.current_load, 2);
        assert_eq!(rob.assigned_holders.len(), 2);
    }

    #[test]
    fn test_assign_rejects_inactive_rob() {
        let (data, engine, actor) = setup();
        let rob = engine
            .create_rob(
                NewRob {
                    id: None,
                    name: "ROB-MPR-001".to_string(),
                    rob_type: RobType::Mpr,
                    capacity: 10,
                    status: RobStatus::Inactive,
                },
                &actor,
            )
            .unwrap();
        let h = new_holder(&data, &engine, &actor);

        let err = engine.assign(&h.id, &rob.id, &actor).unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)));
    }

    #[test]
    fn test_unassign_is_idempotent() {
        let (data, engine, actor) = setup();
        let rob = engine
            .create_rob(NewRob::active("R", RobType::Serial, 5), &actor)
            .unwrap();
        let h = new_holder(&data, &engine, &actor);

        engine.assign(&h.id, &rob.id, &actor).unwrap();
        let first = engine.unassign(&h.id, &actor).unwrap();
        let second = engine.unassign(&h.id, &actor).unwrap();

        assert_eq!(first.status, HolderStatus::Available);
        assert_eq!(second.status, HolderStatus::Available);
        assert!(second.rob_id.is_none());

        let data = data.lock().unwrap();
        assert_eq!(data.rob_by_id(&rob.id).unwrap().current_load, 0);
    }

    #[test]
    fn test_delete_assigned_holder_releases_capacity() {
        let (data, engine, actor) = setup();
        let rob = engine
            .create_rob(NewRob::active("R", RobType::Serial, 8), &actor)
            .unwrap();

        let mut holders = Vec::new();
        for _ in 0..5 {
            let h = new_holder(&data, &engine, &actor);
            engine.assign(&h.id, &rob.id, &actor).unwrap();
            holders.push(h);
        }

        engine.delete_holder(&holders[0].id, &actor).unwrap();

        let data = data.lock().unwrap();
        let rob = data.rob_by_id(&rob.id).unwrap();
        assert_eq!(rob.current_load, 4);
        assert!(!rob.assigned_holders.contains(&holders[0].id));
        assert!(data.holder_by_id(&holders[0].id).is_none());
    }

    #[test]
    fn test_rob_type_is_immutable() {
        let (_, engine, actor) = setup();
        let rob = engine
            .create_rob(NewRob::active("R", RobType::Serial, 5), &actor)
            .unwrap();

        let patch = RobPatch {
            rob_type: Some(RobType::Mpr),
            ..Default::default()
        };
        let err = engine.update_rob(&rob.id, &patch, &actor).unwrap_err();
        assert!(matches!(err, StoreError::ImmutableField { .. }));

        // 状态未被改动
        let unchanged = engine
            .update_rob(&rob.id, &RobPatch::default(), &actor)
            .unwrap();
        assert_eq!(unchanged.rob_type, RobType::Serial);
    }

    #[test]
    fn test_update_rob_rejects_capacity_below_load() {
        let (data, engine, actor) = setup();
        let rob = engine
            .create_rob(NewRob::active("R", RobType::Serial, 5), &actor)
            .unwrap();
        for _ in 0..3 {
            let h = new_holder(&data, &engine, &actor);
            engine.assign(&h.id, &rob.id, &actor).unwrap();
        }

        let patch = RobPatch {
            capacity: Some(2),
            ..Default::default()
        };
        let err = engine.update_rob(&rob.id, &patch, &actor).unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)));

        // 缩容到恰好等于负载是允许的
        let patch = RobPatch {
            capacity: Some(3),
            ..Default::default()
        };
        let rob = engine.update_rob(&rob.id, &patch, &actor).unwrap();
        assert_eq!(rob.capacity, 3);
    }

    #[test]
    fn test_assigned_holder_cannot_enter_maintenance() {
        let (data, engine, actor) = setup();
        let rob = engine
            .create_rob(NewRob::active("R", RobType::Serial, 5), &actor)
            .unwrap();
        let h = new_holder(&data, &engine, &actor);
        engine.assign(&h.id, &rob.id, &actor).unwrap();

        let err = engine
            .set_holder_status(&h.id, HolderStatus::Maintenance, &actor)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidStateTransition { .. }));

        // 容量账目未被破坏
        let data = data.lock().unwrap();
        assert_eq!(data.rob_by_id(&rob.id).unwrap().current_load, 1);
    }

    #[test]
    fn test_out_of_service_releases_assignment() {
        let (data, engine, actor) = setup();
        let rob = engine
            .create_rob(NewRob::active("R", RobType::Serial, 5), &actor)
            .unwrap();
        let h = new_holder(&data, &engine, &actor);
        engine.assign(&h.id, &rob.id, &actor).unwrap();

        let holder = engine
            .set_holder_status(&h.id, HolderStatus::OutOfService, &actor)
            .unwrap();
        assert_eq!(holder.status, HolderStatus::OutOfService);
        assert!(holder.rob_id.is_none());

        let data = data.lock().unwrap();
        assert_eq!(data.rob_by_id(&rob.id).unwrap().current_load, 0);
        data.check_invariants().unwrap();
    }

    #[test]
    fn test_create_holder_requires_existing_family() {
        let (_, engine, actor) = setup();
        let err = engine
            .create_holder(NewHolder::available("H", "missing-family"), &actor)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
