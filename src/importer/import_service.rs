// ==========================================
// 产线工装管理系统 - 导入服务
// ==========================================
// 职责: 导入主流程编排
// 流程: 解析 → 分类/结构校验 → 行级校验 → 划分 → 报告
//       应用(apply)是独立后置步骤,经仓储/引擎落账
// 并发契约: 校验只读快照,逐行让出调度权,行间可取消;
//           取消只丢弃中间产物,活动集合不受影响
// ==========================================

use crate::config::ImportConfig;
use crate::domain::types::{FamilyStatus, HolderStatus, RobStatus, RobType};
use crate::domain::{ActorContext, NewFamily, NewHolder, NewRob};
use crate::engine::AssignmentEngine;
use crate::importer::classifier::{validate_structure, FileKind};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, RawTable, UniversalFileParser};
use crate::importer::report::{AcceptedRow, ApplyOutcome, ImportReport, RejectedRow};
use crate::importer::row_mapper::{map_row, RecordRow};
use crate::importer::row_validator::RowValidator;
use crate::store::dataset::{lock_dataset, SharedDataSet};
use crate::store::{AuditLogRepository, FamilyRepository};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ==========================================
// CancelFlag - 取消标志
// ==========================================
// 行间检查点使用; 置位后当前校验在下一行边界中止
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

// ==========================================
// ImportService Trait
// ==========================================
#[async_trait]
pub trait ImportService: Send + Sync {
    /// 校验内存文本（纯函数语义: 相同输入产出相同报告）
    async fn validate_text(
        &self,
        content: &str,
        cancel: &CancelFlag,
    ) -> ImportResult<ImportReport>;

    /// 校验文件（.csv/.xlsx/.xls,一次性读完）
    async fn validate_file(
        &self,
        file_path: &Path,
        cancel: &CancelFlag,
    ) -> ImportResult<ImportReport>;

    /// 应用已通过校验的行（独立后置步骤,经仓储/引擎落账）
    ///
    /// 校验与应用之间数据集可能已变化,应用阶段逐行重查,
    /// 冲突的行进入 skipped 而不是中止整批
    async fn apply(
        &self,
        report: &ImportReport,
        actor: &ActorContext,
    ) -> ImportResult<ApplyOutcome>;

    /// 批量校验多个文件（并发执行,单个失败不影响其他文件）
    async fn batch_validate(
        &self,
        file_paths: Vec<PathBuf>,
    ) -> Vec<Result<ImportReport, String>>;
}

// ==========================================
// ImportServiceImpl - 导入服务实现
// ==========================================
pub struct ImportServiceImpl {
    data: SharedDataSet,
    config: ImportConfig,
}

impl ImportServiceImpl {
    pub fn new(data: SharedDataSet, config: ImportConfig) -> Self {
        Self { data, config }
    }

    /// 核心校验流程（解析产物 → 报告）
    async fn validate_table(
        &self,
        table: RawTable,
        cancel: &CancelFlag,
    ) -> ImportResult<ImportReport> {
        // === 阶段 1: 分类 + 结构校验（致命错误在此中止）===
        let structure = validate_structure(&table)?;
        let mut warnings = structure.warnings;
        let kind = structure.kind;
        debug!(kind = %kind, rows = table.rows.len(), "结构校验通过");

        if kind == FileKind::Unknown {
            warnings.push("Unknown file type: field-level validation skipped".to_string());
            return Ok(ImportReport {
                file_kind: kind,
                total_rows: table.rows.len(),
                successful_rows: 0,
                error_rows: 0,
                accepted: Vec::new(),
                rejected: Vec::new(),
                errors: Vec::new(),
                warnings,
            });
        }

        // === 阶段 2: 取数据集只读快照（一次加锁,此后不再触碰活动集合）===
        let snapshot = {
            let data = lock_dataset(&self.data)?;
            data.snapshot()
        };

        // === 阶段 3: 逐行校验（行间可取消,让出调度权保持响应）===
        let mut validator = RowValidator::new(snapshot);
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        let mut all_errors = Vec::new();

        for (idx, raw) in table.rows.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(validated = idx, "导入校验在行边界被取消");
                return Err(ImportError::Cancelled);
            }

            let record = map_row(kind, raw).expect("已排除 Unknown 类型");
            let errors = validator.validate(&record);

            if errors.is_empty() {
                accepted.push(AcceptedRow {
                    row_number: raw.row_number,
                    record,
                });
            } else {
                all_errors.extend(errors.iter().cloned());
                rejected.push(RejectedRow {
                    row_number: raw.row_number,
                    raw: raw.values.clone(),
                    errors,
                });
            }

            if self.config.yield_every_rows > 0 && (idx + 1) % self.config.yield_every_rows == 0 {
                tokio::task::yield_now().await;
            }
        }

        let report = ImportReport {
            file_kind: kind,
            total_rows: table.rows.len(),
            successful_rows: accepted.len(),
            error_rows: rejected.len(),
            accepted,
            rejected,
            errors: all_errors
                .into_iter()
                .take(self.config.max_display_errors)
                .collect(),
            warnings,
        };

        info!(
            kind = %report.file_kind,
            total = report.total_rows,
            ok = report.successful_rows,
            bad = report.error_rows,
            "导入校验完成"
        );
        Ok(report)
    }

    // ===== 应用辅助 =====

    fn apply_family_row(
        &self,
        families: &FamilyRepository,
        audit: &AuditLogRepository,
        row: &crate::importer::row_mapper::FamilyRow,
        actor: &ActorContext,
    ) -> Result<(), String> {
        let counter = |name: &str| -> i64 {
            row.counters
                .iter()
                .find(|(col, _)| col == name)
                .and_then(|(_, v)| v.trim().parse::<f64>().ok())
                .map(|v| v.round() as i64)
                .unwrap_or(0)
        };

        let new = NewFamily {
            name: row.name.trim().to_string(),
            code: row.code.trim().to_string(),
            family_type: match row.family_type.trim() {
                "" => None,
                t => Some(t.to_string()),
            },
            // 状态未填时按草稿落账
            status: FamilyStatus::parse(&row.status).unwrap_or(FamilyStatus::Draft),
            description: String::new(),
            kits: counter("KITs"),
            led: counter("Led"),
            goullet: counter("Goullet"),
            bcc_optosoft: counter("BCC Optosoft"),
            bcc_main: counter("BCC Main"),
            rob_main: counter("Rob Main"),
            rob_suite: counter("Rob Suite"),
            torque: counter("Torque"),
            rack_30: counter("Rack 30"),
            machine_visio: counter("Machine Visio"),
            comment: row.comment.clone(),
            total_holders: counter("Total Holders"),
            rob_assignments: Vec::new(),
        };

        let family = families
            .insert(new, &actor.actor_id)
            .map_err(|e| e.to_string())?;
        let _ = audit.record_change(
            "families",
            crate::domain::types::AuditOperation::Create,
            None,
            Some(&family),
            &actor.actor_id,
        );
        Ok(())
    }

    fn apply_holder_row(
        &self,
        engine: &AssignmentEngine,
        families: &FamilyRepository,
        row: &crate::importer::row_mapper::HolderRow,
        actor: &ActorContext,
    ) -> Result<(), String> {
        let family = families
            .find_by_code(row.family_code.trim())
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("Family Code '{}' does not exist", row.family_code.trim()))?;

        // Assigned 状态不随文件落账: 分配关系必须经 assign 建立,
        // 否则无法保证 ROB 容量账目,降级为 Available
        let status = match HolderStatus::parse(&row.status) {
            Some(HolderStatus::Assigned) | None => HolderStatus::Available,
            Some(other) => other,
        };
        if HolderStatus::parse(&row.status) == Some(HolderStatus::Assigned) {
            warn!(
                holder_id = %row.holder_id,
                "导入行状态为 assigned,降级为 available（分配须经 assign 操作）"
            );
        }

        engine
            .create_holder(
                NewHolder {
                    id: Some(row.holder_id.trim().to_string()),
                    name: row.name.trim().to_string(),
                    family_id: family.id,
                    status,
                },
                actor,
            )
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn apply_rob_row(
        &self,
        engine: &AssignmentEngine,
        row: &crate::importer::row_mapper::RobRow,
        actor: &ActorContext,
    ) -> Result<(), String> {
        let rob_type = RobType::parse(&row.rob_type)
            .ok_or_else(|| format!("Invalid type '{}'", row.rob_type.trim()))?;
        let capacity = row
            .capacity
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid capacity '{}'", row.capacity.trim()))?;

        engine
            .create_rob(
                NewRob {
                    id: Some(row.rob_id.trim().to_string()),
                    name: row.name.trim().to_string(),
                    rob_type,
                    capacity,
                    // 状态未填时按未启用落账
                    status: RobStatus::parse(&row.status).unwrap_or(RobStatus::Inactive),
                },
                actor,
            )
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[async_trait]
impl ImportService for ImportServiceImpl {
    #[instrument(skip(self, content, cancel))]
    async fn validate_text(
        &self,
        content: &str,
        cancel: &CancelFlag,
    ) -> ImportResult<ImportReport> {
        let table = CsvParser::parse_str(content)?;
        self.validate_table(table, cancel).await
    }

    #[instrument(skip(self, cancel), fields(file = %file_path.display()))]
    async fn validate_file(
        &self,
        file_path: &Path,
        cancel: &CancelFlag,
    ) -> ImportResult<ImportReport> {
        let table = UniversalFileParser::parse(file_path)?;
        self.validate_table(table, cancel).await
    }

    #[instrument(skip(self, report, actor), fields(kind = %report.file_kind))]
    async fn apply(
        &self,
        report: &ImportReport,
        actor: &ActorContext,
    ) -> ImportResult<ApplyOutcome> {
        let families = FamilyRepository::new(self.data.clone());
        let audit = AuditLogRepository::new(self.data.clone());
        let engine = AssignmentEngine::new(self.data.clone());

        let mut applied = 0usize;
        let mut skipped = Vec::new();

        for row in &report.accepted {
            let result = match &row.record {
                RecordRow::Family(r) => self.apply_family_row(&families, &audit, r, actor),
                RecordRow::Holder(r) => self.apply_holder_row(&engine, &families, r, actor),
                RecordRow::Rob(r) => self.apply_rob_row(&engine, r, actor),
            };

            match result {
                Ok(()) => applied += 1,
                Err(reason) => {
                    warn!(row = row.row_number, reason = %reason, "应用阶段跳过行");
                    skipped.push((row.row_number, reason));
                }
            }
        }

        info!(applied, skipped = skipped.len(), "导入应用完成");
        Ok(ApplyOutcome { applied, skipped })
    }

    async fn batch_validate(
        &self,
        file_paths: Vec<PathBuf>,
    ) -> Vec<Result<ImportReport, String>> {
        let tasks = file_paths.into_iter().map(|path| async move {
            let cancel = CancelFlag::new();
            self.validate_file(&path, &cancel)
                .await
                .map_err(|e| format!("{}: {}", path.display(), e))
        });

        futures::future::join_all(tasks).await
    }
}
