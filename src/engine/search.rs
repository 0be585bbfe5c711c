// ==========================================
// 产线工装管理系统 - 检索引擎
// ==========================================
// 职责: 跨实体集合的只读检索与过滤
// 约束: 只读,不参与任何写路径
// ==========================================

use crate::domain::types::EntityKind;
use crate::domain::{Family, Holder, Rob};
use crate::store::dataset::{lock_dataset, SharedDataSet};
use crate::store::error::StoreResult;
use serde::{Deserialize, Serialize};

// ==========================================
// SearchFilters - 检索条件
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    /// 关键字（产品族按 name/code,工装与 ROB 按 name,大小写不敏感包含匹配）
    pub query: Option<String>,
    /// 状态过滤（字符串词表,与各实体状态的 as_str 对齐）
    pub status: Option<Vec<String>>,
    /// 限定实体集合（None 为全部）
    pub entity_kind: Option<EntityKind>,
}

// ==========================================
// SearchHit - 检索命中
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHit {
    Family(Family),
    Holder(Holder),
    Rob(Rob),
}

// ==========================================
// SearchEngine - 检索引擎
// ==========================================
pub struct SearchEngine {
    data: SharedDataSet,
}

impl SearchEngine {
    pub fn new(data: SharedDataSet) -> Self {
        Self { data }
    }

    /// 执行检索（结果按集合内插入顺序,产品族在前、工装次之、ROB 最后）
    pub fn search(&self, filters: &SearchFilters) -> StoreResult<Vec<SearchHit>> {
        let data = lock_dataset(&self.data)?;
        let query = filters.query.as_ref().map(|q| q.to_lowercase());
        let mut hits = Vec::new();

        let want = |kind: EntityKind| {
            filters.entity_kind.is_none() || filters.entity_kind == Some(kind)
        };
        let status_ok = |s: &str| {
            filters
                .status
                .as_ref()
                .map(|list| list.iter().any(|x| x == s))
                .unwrap_or(true)
        };

        if want(EntityKind::Families) {
            for f in &data.families {
                let text_ok = query.as_ref().map_or(true, |q| {
                    f.name.to_lowercase().contains(q) || f.code.to_lowercase().contains(q)
                });
                if text_ok && status_ok(f.status.as_str()) {
                    hits.push(SearchHit::Family(f.clone()));
                }
            }
        }

        if want(EntityKind::Holders) {
            for h in &data.holders {
                let text_ok = query
                    .as_ref()
                    .map_or(true, |q| h.name.to_lowercase().contains(q));
                if text_ok && status_ok(h.status.as_str()) {
                    hits.push(SearchHit::Holder(h.clone()));
                }
            }
        }

        if want(EntityKind::Robs) {
            for r in &data.robs {
                let text_ok = query
                    .as_ref()
                    .map_or(true, |q| r.name.to_lowercase().contains(q));
                if text_ok && status_ok(r.status.as_str()) {
                    hits.push(SearchHit::Rob(r.clone()));
                }
            }
        }

        Ok(hits)
    }
}
