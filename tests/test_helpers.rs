// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据集初始化、实体构造等功能
// ==========================================

use fixture_console::domain::types::{FamilyStatus, RobStatus, RobType};
use fixture_console::domain::{ActorContext, NewFamily, NewHolder, NewRob};
use fixture_console::engine::AssignmentEngine;
use fixture_console::store::{new_shared_dataset, FamilyRepository, SharedDataSet};

/// 测试用操作人
pub fn actor() -> ActorContext {
    ActorContext::new("tester")
}

/// 创建空数据集 + 分配引擎
pub fn setup_engine() -> (SharedDataSet, AssignmentEngine) {
    let data = new_shared_dataset();
    let engine = AssignmentEngine::new(data.clone());
    (data, engine)
}

/// 插入一个产品族,返回其实体ID
pub fn seed_family(data: &SharedDataSet, name: &str, code: &str) -> String {
    let families = FamilyRepository::new(data.clone());
    families
        .insert(NewFamily::minimal(name, code, FamilyStatus::Active), "tester")
        .expect("插入产品族失败")
        .id
}

/// 创建一个可用工装,返回其实体ID
pub fn seed_holder(engine: &AssignmentEngine, family_id: &str, name: &str) -> String {
    engine
        .create_holder(NewHolder::available(name, family_id), &actor())
        .expect("创建工装失败")
        .id
}

/// 创建一个 Active 的 SERIAL 工作站,返回其实体ID
pub fn seed_rob(engine: &AssignmentEngine, name: &str, capacity: u32) -> String {
    engine
        .create_rob(NewRob::active(name, RobType::Serial, capacity), &actor())
        .expect("创建 ROB 失败")
        .id
}

/// 创建指定状态的工作站
pub fn seed_rob_with_status(
    engine: &AssignmentEngine,
    name: &str,
    capacity: u32,
    status: RobStatus,
) -> String {
    engine
        .create_rob(
            NewRob {
                id: None,
                name: name.to_string(),
                rob_type: RobType::Serial,
                capacity,
                status,
            },
            &actor(),
        )
        .expect("创建 ROB 失败")
        .id
}
