// ==========================================
// ICU 运营核心 - 分诊 API
// ==========================================
// 职责: 编排风险分类器调用 + 优先级引擎排序 + 叙述生成
// 说明: 单个患者的上游失败/校验失败只产生告警,不使整批失败
// ==========================================

use crate::api::collaborators::{ExplanationService, RiskClassifier};
use crate::api::dto::{ExplainedResult, RankingReport, RankingWarning, WarningKind};
use crate::domain::patient::{CandidateRecord, PatientIntake};
use crate::domain::priority::PriorityResult;
use crate::engine::narrative::fallback_narrative;
use crate::engine::priority::{PriorityEngine, RankingOutcome};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// 分诊 API
pub struct TriageApi {
    classifier: Arc<dyn RiskClassifier>,
    explainer: Option<Arc<dyn ExplanationService>>,
    engine: PriorityEngine,
}

impl TriageApi {
    /// 创建新的 TriageApi 实例
    ///
    /// # 参数
    /// - classifier: 外部风险分类器
    /// - engine: 分诊优先级引擎
    pub fn new(classifier: Arc<dyn RiskClassifier>, engine: PriorityEngine) -> Self {
        Self {
            classifier,
            explainer: None,
            engine,
        }
    }

    /// 挂接外部解释服务（未挂接时总是使用模板叙述）
    pub fn with_explainer(mut self, explainer: Arc<dyn ExplanationService>) -> Self {
        self.explainer = Some(explainer);
        self
    }

    pub fn engine(&self) -> &PriorityEngine {
        &self.engine
    }

    // ==========================================
    // 排序接口
    // ==========================================

    /// 批量评估并排序待诊患者
    ///
    /// 分类器调用并发执行；调用失败的患者记为 UpstreamUnavailable 告警,
    /// 校验失败的记为 Validation 告警，其余患者正常排序
    ///
    /// # 参数
    /// - intakes: 待评估患者
    /// - now: 本次排序的参考时间
    ///
    /// # 返回
    /// - RankingReport: 已排序结果 + 告警
    #[instrument(skip(self, intakes), fields(count = intakes.len()))]
    pub async fn rank_patients(
        &self,
        intakes: Vec<PatientIntake>,
        now: DateTime<Utc>,
    ) -> RankingReport {
        let assessments = join_all(
            intakes
                .iter()
                .map(|intake| self.classifier.assess(&intake.identifier)),
        )
        .await;

        let mut records = Vec::with_capacity(intakes.len());
        let mut warnings = Vec::new();

        for (intake, assessment) in intakes.into_iter().zip(assessments) {
            match assessment {
                Ok(assessment) => records.push(intake.with_assessment(assessment)),
                Err(e) => {
                    tracing::warn!(identifier = %intake.identifier, "风险分类器调用失败: {}", e);
                    warnings.push(RankingWarning {
                        identifier: intake.identifier,
                        kind: WarningKind::UpstreamUnavailable,
                        message: e.to_string(),
                    });
                }
            }
        }

        let outcome = self.engine.rank_records(&records, now);
        Self::build_report(outcome, warnings, now)
    }

    /// 排序已带风险评估的记录（不调用分类器）
    pub fn rank_candidates(&self, records: &[CandidateRecord], now: DateTime<Utc>) -> RankingReport {
        let outcome = self.engine.rank_records(records, now);
        Self::build_report(outcome, Vec::new(), now)
    }

    fn build_report(
        outcome: RankingOutcome,
        mut warnings: Vec<RankingWarning>,
        now: DateTime<Utc>,
    ) -> RankingReport {
        warnings.extend(outcome.rejected.into_iter().map(|r| RankingWarning {
            identifier: r.identifier,
            kind: WarningKind::Validation,
            message: r.error.to_string(),
        }));

        RankingReport {
            report_id: Uuid::new_v4().to_string(),
            generated_at: now,
            results: outcome.ranked,
            warnings,
        }
    }

    // ==========================================
    // 叙述接口
    // ==========================================

    /// 生成分诊结论的文字说明
    ///
    /// 外部解释服务失败或未挂接时退回模板叙述
    pub async fn explain(&self, result: &PriorityResult) -> ExplainedResult {
        let external = match &self.explainer {
            Some(explainer) => match explainer.explain(result).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(identifier = %result.identifier, "解释服务失败，使用模板叙述: {}", e);
                    None
                }
            },
            None => None,
        };

        let narrative_fallback = external.is_none();
        ExplainedResult {
            result: result.clone(),
            narrative: external.unwrap_or_else(|| fallback_narrative(result)),
            narrative_fallback,
        }
    }
}
