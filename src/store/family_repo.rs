// ==========================================
// 产线工装管理系统 - 产品族仓储
// ==========================================
// 红线: Repository 不含业务编排,只做数据访问与完整性约束
// 约束: code 唯一性在此层强制（等价于数据库唯一索引）
// ==========================================

use crate::domain::{Family, FamilyPatch, NewFamily};
use crate::store::dataset::{lock_dataset, SharedDataSet};
use crate::store::error::{StoreError, StoreResult};
use chrono::Utc;
use uuid::Uuid;

// ==========================================
// FamilyRepository - 产品族仓储
// ==========================================
pub struct FamilyRepository {
    data: SharedDataSet,
}

impl FamilyRepository {
    pub fn new(data: SharedDataSet) -> Self {
        Self { data }
    }

    /// 按实体ID查询
    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Family>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.family_by_id(id).cloned())
    }

    /// 按业务编码查询
    pub fn find_by_code(&self, code: &str) -> StoreResult<Option<Family>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.family_by_code(code).cloned())
    }

    /// 全量列表（保持插入顺序）
    pub fn list(&self) -> StoreResult<Vec<Family>> {
        let data = lock_dataset(&self.data)?;
        Ok(data.families.clone())
    }

    pub fn count(&self) -> StoreResult<usize> {
        let data = lock_dataset(&self.data)?;
        Ok(data.families.len())
    }

    /// 创建产品族
    ///
    /// # 约束
    /// - code 与现存产品族冲突时返回 DuplicateKey
    pub fn insert(&self, new: NewFamily, created_by: &str) -> StoreResult<Family> {
        let mut data = lock_dataset(&self.data)?;

        if data.family_by_code(&new.code).is_some() {
            return Err(StoreError::duplicate_key("Family", "code", &new.code));
        }

        let now = Utc::now();
        let family = Family {
            id: Uuid::new_v4().to_string(),
            code: new.code,
            name: new.name,
            family_type: new.family_type,
            status: new.status,
            description: new.description,
            kits: new.kits,
            led: new.led,
            goullet: new.goullet,
            bcc_optosoft: new.bcc_optosoft,
            bcc_main: new.bcc_main,
            rob_main: new.rob_main,
            rob_suite: new.rob_suite,
            torque: new.torque,
            rack_30: new.rack_30,
            machine_visio: new.machine_visio,
            comment: new.comment,
            total_holders: new.total_holders,
            rob_assignments: new.rob_assignments,
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
        };

        data.families.push(family.clone());
        Ok(family)
    }

    /// 部分更新
    ///
    /// # 约束
    /// - 变更 code 时检查与其他产品族的冲突
    /// - updated_at 由本层统一盖章
    ///
    /// # 返回
    /// (变更前, 变更后) 快照对,供审计层使用
    pub fn update(&self, id: &str, patch: &FamilyPatch) -> StoreResult<(Family, Family)> {
        let mut data = lock_dataset(&self.data)?;

        if let Some(new_code) = &patch.code {
            if data
                .families
                .iter()
                .any(|f| f.id != id && &f.code == new_code)
            {
                return Err(StoreError::duplicate_key("Family", "code", new_code));
            }
        }

        let family = data
            .families
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| StoreError::not_found("Family", id))?;

        let before = family.clone();
        family.apply_patch(patch);
        family.updated_at = Utc::now();
        let after = family.clone();

        Ok((before, after))
    }

    /// 删除产品族
    ///
    /// 注意: 不级联处理引用它的工装（悬空 family_id 是文档化的接受行为,
    /// 由调用方在删除前自行检查或放任）
    pub fn remove(&self, id: &str) -> StoreResult<Family> {
        let mut data = lock_dataset(&self.data)?;

        let pos = data
            .families
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| StoreError::not_found("Family", id))?;

        Ok(data.families.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FamilyStatus;
    use crate::store::dataset::new_shared_dataset;

    fn repo() -> FamilyRepository {
        FamilyRepository::new(new_shared_dataset())
    }

    #[test]
    fn test_insert_assigns_id_and_timestamps() {
        let repo = repo();
        let family = repo
            .insert(
                NewFamily::minimal("VW FRONT BUMPER 699", "VW-FB-699", FamilyStatus::Active),
                "user-1",
            )
            .unwrap();

        assert!(!family.id.is_empty());
        assert_eq!(family.created_by, "user-1");
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_insert_duplicate_code_rejected() {
        let repo = repo();
        repo.insert(
            NewFamily::minimal("A", "VW-FB-699", FamilyStatus::Active),
            "u",
        )
        .unwrap();

        let err = repo
            .insert(
                NewFamily::minimal("B", "VW-FB-699", FamilyStatus::Draft),
                "u",
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[test]
    fn test_update_code_collision_rejected() {
        let repo = repo();
        repo.insert(NewFamily::minimal("A", "A-1", FamilyStatus::Active), "u")
            .unwrap();
        let b = repo
            .insert(NewFamily::minimal("B", "B-1", FamilyStatus::Active), "u")
            .unwrap();

        let patch = FamilyPatch {
            code: Some("A-1".to_string()),
            ..Default::default()
        };
        let err = repo.update(&b.id, &patch).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[test]
    fn test_update_stamps_updated_at() {
        let repo = repo();
        let f = repo
            .insert(NewFamily::minimal("A", "A-1", FamilyStatus::Draft), "u")
            .unwrap();

        let patch = FamilyPatch {
            status: Some(FamilyStatus::Active),
            ..Default::default()
        };
        let (before, after) = repo.update(&f.id, &patch).unwrap();
        assert_eq!(before.status, FamilyStatus::Draft);
        assert_eq!(after.status, FamilyStatus::Active);
        assert!(after.updated_at >= before.updated_at);
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let repo = repo();
        let err = repo.remove("nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
