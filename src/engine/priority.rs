// ==========================================
// ICU 运营核心 - 分诊优先级引擎
// ==========================================
// 职责: 风险分档 + 候诊升档 + 置信度 + 可解释短语 + 全序排序
// 输入: 风险评估 + 生命体征 + 候诊时长 (显式 now)
// 输出: PriorityResult 列表 (按紧急程度从高到低)
// 红线: 纯函数,无随机数,不读系统时钟
// ==========================================

mod core;
mod explain;
mod validation;

#[cfg(test)]
mod tests;

pub use self::core::{CandidateRejection, PriorityEngine, RankingOutcome};
pub use explain::phrases;
pub use validation::validate_candidate;
