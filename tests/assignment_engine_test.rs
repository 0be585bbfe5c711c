// ==========================================
// 产线工装管理系统 - 分配引擎集成测试
// ==========================================
// 覆盖: 容量约束、双侧一致性、幂等解除、
//       删除释放容量、不可变字段、状态流转
// ==========================================

mod test_helpers;

use fixture_console::domain::types::{HolderStatus, RobStatus};
use fixture_console::domain::RobPatch;
use fixture_console::store::StoreError;
use test_helpers::*;

// ==========================================
// 场景: 容量逐格占满后立即失败
// ==========================================
#[test]
fn test_capacity_two_accepts_two_then_rejects_third() {
    let (data, engine) = setup_engine();
    let family_id = seed_family(&data, "VW FRONT BUMPER 699", "VW-FB-699");
    let rob_id = seed_rob(&engine, "ROB-SERIAL-001", 2);

    let a = seed_holder(&engine, &family_id, "H-A");
    let b = seed_holder(&engine, &family_id, "H-B");
    let c = seed_holder(&engine, &family_id, "H-C");

    let (_, rob) = engine.assign(&a, &rob_id, &actor()).unwrap();
    assert_eq!(rob.current_load, 1);

    let (_, rob) = engine.assign(&b, &rob_id, &actor()).unwrap();
    assert_eq!(rob.current_load, 2);

    let err = engine.assign(&c, &rob_id, &actor()).unwrap_err();
    assert!(matches!(err, StoreError::CapacityExceeded { .. }));

    // 失败调用不得触碰账目
    let guard = data.lock().unwrap();
    let rob = guard.rob_by_id(&rob_id).unwrap();
    assert_eq!(rob.current_load, 2);
    assert_eq!(rob.assigned_holders.len(), 2);
    guard.check_invariants().unwrap();
}

// ==========================================
// 不变量: 任意操作序列后账目一致
// ==========================================
#[test]
fn test_invariants_hold_after_mixed_sequence() {
    let (data, engine) = setup_engine();
    let family_id = seed_family(&data, "ENGINE 1", "ENG-001");
    let rob_a = seed_rob(&engine, "ROB-A", 3);
    let rob_b = seed_rob(&engine, "ROB-B", 2);

    let holders: Vec<String> = (0..4)
        .map(|i| seed_holder(&engine, &family_id, &format!("H-{}", i)))
        .collect();

    engine.assign(&holders[0], &rob_a, &actor()).unwrap();
    engine.assign(&holders[1], &rob_a, &actor()).unwrap();
    engine.assign(&holders[2], &rob_b, &actor()).unwrap();
    engine.unassign(&holders[0], &actor()).unwrap();
    engine.assign(&holders[3], &rob_a, &actor()).unwrap();
    engine.assign(&holders[0], &rob_b, &actor()).unwrap();
    engine.delete_holder(&holders[1], &actor()).unwrap();

    let guard = data.lock().unwrap();
    guard.check_invariants().unwrap();
    assert_eq!(guard.rob_by_id(&rob_a).unwrap().current_load, 1);
    assert_eq!(guard.rob_by_id(&rob_b).unwrap().current_load, 2);

    // holder.status == Assigned 当且仅当 rob_id 非空
    for holder in &guard.holders {
        assert_eq!(
            holder.status == HolderStatus::Assigned,
            holder.rob_id.is_some()
        );
    }
}

// ==========================================
// 幂等: 连续两次 unassign 终态一致
// ==========================================
#[test]
fn test_double_unassign_same_end_state() {
    let (data, engine) = setup_engine();
    let family_id = seed_family(&data, "F", "F-1");
    let rob_id = seed_rob(&engine, "R", 5);
    let holder_id = seed_holder(&engine, &family_id, "H");

    engine.assign(&holder_id, &rob_id, &actor()).unwrap();
    let once = engine.unassign(&holder_id, &actor()).unwrap();
    let twice = engine.unassign(&holder_id, &actor()).unwrap();

    assert_eq!(once.status, HolderStatus::Available);
    assert_eq!(twice.status, HolderStatus::Available);
    assert!(twice.rob_id.is_none());
    assert!(twice.assigned_at.is_none());

    let guard = data.lock().unwrap();
    assert_eq!(guard.rob_by_id(&rob_id).unwrap().current_load, 0);
}

// ==========================================
// 场景: 类型变更被拒,状态不变
// ==========================================
#[test]
fn test_type_change_rejected_state_unchanged() {
    let (data, engine) = setup_engine();
    seed_family(&data, "F", "F-1");
    let rob_id = seed_rob(&engine, "R", 5); // SERIAL

    let err = engine
        .update_rob(
            &rob_id,
            &RobPatch {
                rob_type: Some(fixture_console::domain::types::RobType::Mpr),
                ..Default::default()
            },
            &actor(),
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::ImmutableField { .. }));

    let guard = data.lock().unwrap();
    let rob = guard.rob_by_id(&rob_id).unwrap();
    assert_eq!(rob.rob_type, fixture_console::domain::types::RobType::Serial);
}

// ==========================================
// 场景: 删除已分配工装,负载 5 → 4
// ==========================================
#[test]
fn test_delete_assigned_holder_load_five_to_four() {
    let (data, engine) = setup_engine();
    let family_id = seed_family(&data, "F", "F-1");
    let rob_id = seed_rob(&engine, "ROB-X", 10);

    let mut ids = Vec::new();
    for i in 0..5 {
        let id = seed_holder(&engine, &family_id, &format!("H-{}", i));
        engine.assign(&id, &rob_id, &actor()).unwrap();
        ids.push(id);
    }

    engine.delete_holder(&ids[2], &actor()).unwrap();

    let guard = data.lock().unwrap();
    let rob = guard.rob_by_id(&rob_id).unwrap();
    assert_eq!(rob.current_load, 4);
    assert!(!rob.assigned_holders.contains(&ids[2]));
    guard.check_invariants().unwrap();
}

// ==========================================
// 非 Active 工作站不接收分配
// ==========================================
#[test]
fn test_non_active_rob_rejects_assignment() {
    let (data, engine) = setup_engine();
    let family_id = seed_family(&data, "F", "F-1");
    let holder_id = seed_holder(&engine, &family_id, "H");

    for status in [RobStatus::Inactive, RobStatus::Maintenance, RobStatus::Stopped] {
        let rob_id = seed_rob_with_status(
            &engine,
            &format!("R-{}", status),
            5,
            status,
        );
        let err = engine.assign(&holder_id, &rob_id, &actor()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)), "status={}", status);
    }
}

// ==========================================
// 状态流转矩阵
// ==========================================
#[test]
fn test_holder_status_transitions() {
    let (data, engine) = setup_engine();
    let family_id = seed_family(&data, "F", "F-1");
    let rob_id = seed_rob(&engine, "R", 5);

    // Available ↔ Maintenance
    let h1 = seed_holder(&engine, &family_id, "H1");
    let h = engine
        .set_holder_status(&h1, HolderStatus::Maintenance, &actor())
        .unwrap();
    assert_eq!(h.status, HolderStatus::Maintenance);
    let h = engine
        .set_holder_status(&h1, HolderStatus::Available, &actor())
        .unwrap();
    assert_eq!(h.status, HolderStatus::Available);

    // 任意状态 → Assigned 必须走 assign
    let err = engine
        .set_holder_status(&h1, HolderStatus::Assigned, &actor())
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidStateTransition { .. }));

    // Assigned → Maintenance 被拒（须先解除分配）
    engine.assign(&h1, &rob_id, &actor()).unwrap();
    let err = engine
        .set_holder_status(&h1, HolderStatus::Maintenance, &actor())
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidStateTransition { .. }));

    // Assigned → OutOfService 放行并释放容量
    let h = engine
        .set_holder_status(&h1, HolderStatus::OutOfService, &actor())
        .unwrap();
    assert_eq!(h.status, HolderStatus::OutOfService);
    assert!(h.rob_id.is_none());

    // OutOfService 为终态
    let err = engine
        .set_holder_status(&h1, HolderStatus::Available, &actor())
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidStateTransition { .. }));

    let guard = data.lock().unwrap();
    assert_eq!(guard.rob_by_id(&rob_id).unwrap().current_load, 0);
    guard.check_invariants().unwrap();
}

// ==========================================
// 审计: 分配操作落账
// ==========================================
#[test]
fn test_assignment_writes_audit_records() {
    let (data, engine) = setup_engine();
    let family_id = seed_family(&data, "F", "F-1");
    let rob_id = seed_rob(&engine, "R", 5);
    let holder_id = seed_holder(&engine, &family_id, "H");

    let before = data.lock().unwrap().audit_logs.len();
    engine.assign(&holder_id, &rob_id, &actor()).unwrap();
    let guard = data.lock().unwrap();

    // 工装侧与 ROB 侧各一条 UPDATE
    assert_eq!(guard.audit_logs.len(), before + 2);
    let last = guard.audit_logs.last().unwrap();
    assert_eq!(last.actor, "tester");
    assert!(last.old_data.is_some() && last.new_data.is_some());
}
