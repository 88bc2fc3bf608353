use super::explain::explain;
use super::validation::validate_candidate;
use crate::config::core_config::TriageConfig;
use crate::domain::patient::{CandidateRecord, PatientCandidate, RiskAssessment};
use crate::domain::priority::PriorityResult;
use crate::domain::types::{DeteriorationRisk, RiskCategory, Severity};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::instrument;

/// 各分档的基础优先级
const RANK_CRITICAL: u8 = 1;
const RANK_MODERATE: u8 = 4;
const RANK_MINOR: u8 = 7;

// ==========================================
// 批量排序结果
// ==========================================

/// 单条候选被拒原因
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRejection {
    pub identifier: String,
    pub error: EngineError,
}

/// 批量排序结果：成功子集 + 逐条拒绝原因（不做全有或全无）
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RankingOutcome {
    pub ranked: Vec<PriorityResult>,
    pub rejected: Vec<CandidateRejection>,
}

// ==========================================
// PriorityEngine - 分诊优先级引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct PriorityEngine {
    // 无状态引擎,只持有只读阈值
    config: TriageConfig,
}

impl PriorityEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `config`: 分诊阈值（默认 65/45/45 分钟）
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 校验并分诊单条上游记录
    ///
    /// # 返回
    /// - Ok(PriorityResult)
    /// - Err(EngineError::Validation): 字段缺失或不合法
    pub fn classify(
        &self,
        record: &CandidateRecord,
        now: DateTime<Utc>,
    ) -> EngineResult<PriorityResult> {
        let candidate = validate_candidate(record)?;
        Ok(self.classify_candidate(&candidate, now))
    }

    /// 分诊已校验的候选
    pub fn classify_candidate(
        &self,
        candidate: &PatientCandidate,
        now: DateTime<Utc>,
    ) -> PriorityResult {
        let assessment = &candidate.assessment;
        let (deterioration_risk, severity, base_rank) = self.tier(assessment);

        let wait_time_minutes = wait_time_minutes(candidate.registration_time, now);
        let (priority_rank, escalated) = self.escalate(base_rank, wait_time_minutes);

        PriorityResult {
            identifier: candidate.identifier.clone(),
            deterioration_risk,
            severity,
            wait_time_minutes,
            priority_rank,
            confidence_score: self.confidence_score(assessment.risk_score),
            explainability: explain(&candidate.vitals, assessment, &self.config.vitals),
            risk_score: assessment.risk_score,
            risk_flag: assessment.risk_flag,
            escalated,
        }
    }

    /// 排序候选列表
    ///
    /// 排序键:
    /// 1) priority_rank 升序
    /// 2) risk_score 降序 (任何档内都是高风险在前)
    ///
    /// 稳定排序：完全相同的键保持输入顺序
    #[instrument(skip(self, candidates), fields(count = candidates.len()))]
    pub fn rank(&self, candidates: &[PatientCandidate], now: DateTime<Utc>) -> Vec<PriorityResult> {
        let results = candidates
            .iter()
            .map(|c| self.classify_candidate(c, now))
            .collect();
        Self::sort_results(results)
    }

    /// 校验并排序上游记录
    ///
    /// 单条校验失败只剔除该条，记入 rejected，不影响其余记录
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn rank_records(&self, records: &[CandidateRecord], now: DateTime<Utc>) -> RankingOutcome {
        let mut ranked = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for record in records {
            match self.classify(record, now) {
                Ok(result) => ranked.push(result),
                Err(error) => {
                    tracing::warn!(identifier = %record.identifier, code = error.code(), "候选被剔除: {}", error);
                    rejected.push(CandidateRejection {
                        identifier: record.identifier.clone(),
                        error,
                    });
                }
            }
        }

        RankingOutcome {
            ranked: Self::sort_results(ranked),
            rejected,
        }
    }

    /// 对已分诊结果做稳定排序
    pub fn sort_results(mut results: Vec<PriorityResult>) -> Vec<PriorityResult> {
        results.sort_by(Self::compare);
        results
    }

    /// 比较两个结果的先后
    ///
    /// # 返回
    /// Ordering::Less 表示 a 优先于 b
    pub fn compare(a: &PriorityResult, b: &PriorityResult) -> Ordering {
        match a.priority_rank.cmp(&b.priority_rank) {
            Ordering::Equal => {}
            other => return other,
        }
        b.risk_score.total_cmp(&a.risk_score)
    }

    /// 按标识子串过滤（不区分大小写）
    ///
    /// 只决定展示哪些行，不改变任何计算值与相对顺序，
    /// 因此先过滤后排序与先排序后过滤结果一致
    pub fn filter_by_identifier(results: &[PriorityResult], query: &str) -> Vec<PriorityResult> {
        let needle = query.trim().to_lowercase();
        results
            .iter()
            .filter(|r| needle.is_empty() || r.identifier.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    // ==========================================
    // 分档 / 升档 / 置信度
    // ==========================================

    /// 风险分档（顺序判定，命中即返回）
    ///
    /// 1) HIGH 或 score >= critical → (High, Critical, 1)
    /// 2) MODERATE 或 score >= moderate → (Medium, Moderate, 4)
    /// 3) 其他 → (Low, Minor, 7)
    pub fn tier(&self, assessment: &RiskAssessment) -> (DeteriorationRisk, Severity, u8) {
        let score = assessment.risk_score;

        if assessment.risk_category == RiskCategory::High
            || score >= self.config.critical_risk_threshold
        {
            return (DeteriorationRisk::High, Severity::Critical, RANK_CRITICAL);
        }

        if assessment.risk_category == RiskCategory::Moderate
            || score >= self.config.moderate_risk_threshold
        {
            return (DeteriorationRisk::Medium, Severity::Moderate, RANK_MODERATE);
        }

        (DeteriorationRisk::Low, Severity::Minor, RANK_MINOR)
    }

    /// 候诊升档
    ///
    /// wait > 阈值 且 base_rank > 1 → 上调一档（不低于 1）
    ///
    /// # 返回
    /// (最终优先级, 是否升档)
    pub fn escalate(&self, base_rank: u8, wait_time_minutes: u32) -> (u8, bool) {
        if wait_time_minutes > self.config.wait_escalation_minutes && base_rank > RANK_CRITICAL {
            ((base_rank - 1).max(RANK_CRITICAL), true)
        } else {
            (base_rank, false)
        }
    }

    /// 置信度 = round(clamp(base + risk_score / 10, min, max))
    ///
    /// 展示用启发式，不是统计估计，也不来自分类器自身的不确定度。
    /// 非有限分数（未经校验直接构造的候选）取下限
    pub fn confidence_score(&self, risk_score: f64) -> u8 {
        let c = &self.config;
        if !risk_score.is_finite() {
            return c.confidence_min.round() as u8;
        }
        (c.confidence_base + risk_score / 10.0)
            .clamp(c.confidence_min, c.confidence_max)
            .round() as u8
    }
}

/// 候诊分钟数 = now - registration_time
///
/// 登记时间晚于 now（上游时钟偏差）按 0 处理
pub fn wait_time_minutes(registration_time: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let minutes = (now - registration_time).num_minutes();
    u32::try_from(minutes.max(0)).unwrap_or(u32::MAX)
}
