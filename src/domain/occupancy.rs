// ==========================================
// ICU 运营核心 - 占用预测领域模型
// ==========================================
// 职责: 历史占用观测 / 预测点 / 预测集合与汇总
// ==========================================

use crate::domain::types::{ConfidenceLabel, ConfidenceLevel, ForecastMethod, RecentTrend};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// OccupancyObservation - 历史占用观测
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyObservation {
    pub timestamp: DateTime<Utc>,
    pub count: u32,
}

impl OccupancyObservation {
    pub fn new(timestamp: DateTime<Utc>, count: u32) -> Self {
        Self { timestamp, count }
    }
}

// ==========================================
// ForecastPoint - 单小时预测点
// ==========================================
// 不变量: lower_bound <= predicted_count <= upper_bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub hour_offset: u32,                  // 1..=6
    pub timestamp: DateTime<Utc>,          // base_time + hour_offset 小时
    pub time_label: String,                // 展示用 "%I:%M %p"
    pub predicted_count: u32,
    pub lower_bound: u32,
    pub upper_bound: u32,
    pub confidence_label: ConfidenceLabel,
    pub confidence_interval_label: String, // 例如 "90%"
    pub expected_error: f64,
}

// ==========================================
// ForecastSummary - 预测汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub total_predicted: u64,       // 6 点预测值之和
    pub peak_hour: DateTime<Utc>,   // 最大预测值所在时刻,并列取最早
    pub peak_hour_offset: u32,
    pub peak_time_label: String,
    pub peak_count: u32,
}

// ==========================================
// ForecastSet - 6 点预测集合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    pub points: Vec<ForecastPoint>,
    pub summary: ForecastSummary,

    // ===== 推导依据 (可解释性) =====
    pub method: ForecastMethod,
    pub confidence_level: ConfidenceLevel,
    pub baseline: u32,
    pub slope_per_hour: f64,
    pub recent_trend: RecentTrend,
    pub base_time: DateTime<Utc>,
}

impl ForecastSet {
    /// 是否为非模型推导的退化预测
    pub fn is_fallback(&self) -> bool {
        self.method == ForecastMethod::FlatFallback
    }
}
