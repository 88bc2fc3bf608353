// ==========================================
// ICU 运营核心 - 优先级结果领域模型
// ==========================================

use crate::domain::types::{DeteriorationRisk, Severity};
use serde::{Deserialize, Serialize};

// ==========================================
// PriorityResult - 单个患者的分诊结论
// ==========================================
// priority_rank 与 confidence_score 均为输入的确定性纯函数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityResult {
    pub identifier: String,
    pub deterioration_risk: DeteriorationRisk,
    pub severity: Severity,
    pub wait_time_minutes: u32,
    pub priority_rank: u8,         // 1-7, 越小越紧急
    pub confidence_score: u8,      // 75-95 (%)
    pub explainability: Vec<String>,

    // ===== 排序与叙述所需的原始输入 =====
    pub risk_score: f64,           // 同档内按降序打破平局
    pub risk_flag: bool,
    pub escalated: bool,           // 是否因候诊超时上调一档
}

impl PriorityResult {
    /// 是否包含指定的触发短语
    pub fn has_phrase(&self, phrase: &str) -> bool {
        self.explainability.iter().any(|p| p == phrase)
    }
}
