// ==========================================
// ICU 运营核心 - API 报告对象
// ==========================================

use crate::domain::priority::PriorityResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 批量排序告警类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    /// 风险分类器调用失败
    UpstreamUnavailable,
    /// 记录校验失败
    Validation,
}

/// 单个患者的排序告警（不影响其余患者）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingWarning {
    pub identifier: String,
    pub kind: WarningKind,
    pub message: String,
}

/// 批量排序报告：成功子集 + 逐条告警
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<PriorityResult>,
    pub warnings: Vec<RankingWarning>,
}

impl RankingReport {
    /// 是否为部分结果
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// 分诊结论 + 文字说明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedResult {
    pub result: PriorityResult,
    pub narrative: String,
    /// true 表示外部解释服务失败，使用了模板叙述
    pub narrative_fallback: bool,
}
