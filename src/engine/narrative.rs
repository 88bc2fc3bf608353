// ==========================================
// ICU 运营核心 - 兜底叙述生成
// ==========================================
// 职责: 外部解释服务不可用时,用模板生成分诊结论的文字说明
// 输入: PriorityResult
// 输出: 英文叙述 (与前端展示语言一致)
// ==========================================

use crate::domain::priority::PriorityResult;
use crate::domain::types::DeteriorationRisk;
use crate::engine::priority::phrases;

/// 生成模板叙述
pub fn fallback_narrative(result: &PriorityResult) -> String {
    let factors = triggered_factors(result);
    let score = result.risk_score;

    let label = match result.deterioration_risk {
        DeteriorationRisk::High => "HIGH",
        DeteriorationRisk::Medium => "MODERATE",
        DeteriorationRisk::Low => "LOW",
    };

    if factors.is_empty() {
        return format!(
            "Patient classified as {} risk with a score of {:.1}/100. \
             Vital signs are within normal ranges. Routine monitoring is recommended.",
            label, score
        );
    }

    let factors_text = join_factors(&factors);

    match result.deterioration_risk {
        DeteriorationRisk::High => format!(
            "Patient classified as HIGH risk (score: {:.1}/100) due to {}. \
             Immediate clinical attention is recommended. Close monitoring of vital signs is essential.",
            score, factors_text
        ),
        DeteriorationRisk::Medium => format!(
            "Patient classified as MODERATE risk (score: {:.1}/100). \
             Contributing factors include {}. Regular monitoring and reassessment are advised.",
            score, factors_text
        ),
        DeteriorationRisk::Low => format!(
            "Patient classified as LOW risk (score: {:.1}/100). \
             Minor concerns noted: {}. Standard care protocols apply.",
            score, factors_text
        ),
    }
}

/// 提取体征触发短语（去掉结论短语与分数）
fn triggered_factors(result: &PriorityResult) -> Vec<&str> {
    result
        .explainability
        .iter()
        .map(String::as_str)
        .filter(|p| {
            *p != phrases::NORMAL
                && *p != phrases::IMMEDIATE_ATTENTION
                && *p != phrases::MONITORING
                && !p.starts_with("risk score")
        })
        .collect()
}

/// "a" / "a and b" / "a, b and c"
fn join_factors(factors: &[&str]) -> String {
    match factors {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
