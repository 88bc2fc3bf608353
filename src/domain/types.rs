// ==========================================
// ICU 运营核心 - 领域类型定义
// ==========================================
// 职责: 风险分类 / 恶化风险 / 严重度 / 预测置信度等枚举
// 序列化格式: 与上游系统一致 (见各枚举的 serde 标注)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 风险分类 (Risk Category)
// ==========================================
// 由外部风险分类器给出,本系统只读,不重新计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCategory::Low => write!(f, "LOW"),
            RiskCategory::Moderate => write!(f, "MODERATE"),
            RiskCategory::High => write!(f, "HIGH"),
        }
    }
}

// ==========================================
// 恶化风险 (Deterioration Risk)
// ==========================================
// 由 risk_score + risk_category 推导的定性分档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeteriorationRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for DeteriorationRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeteriorationRisk::Low => write!(f, "Low"),
            DeteriorationRisk::Medium => write!(f, "Medium"),
            DeteriorationRisk::High => write!(f, "High"),
        }
    }
}

// ==========================================
// 严重度 (Severity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Minor => write!(f, "Minor"),
            Severity::Moderate => write!(f, "Moderate"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

// ==========================================
// 预测置信档 (Confidence Label)
// ==========================================
// 按预测步长分档的展示标签,不是统计检验结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLabel::Low => write!(f, "low"),
            ConfidenceLabel::Medium => write!(f, "medium"),
            ConfidenceLabel::High => write!(f, "high"),
        }
    }
}

// ==========================================
// 置信区间水平 (Confidence Level)
// ==========================================
// 可识别取值: "80%" / "90%" / "95%"
// 每个取值对应 expected_error 的一个倍数,水平越高倍数越大
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "80%")]
    P80,
    #[serde(rename = "90%")]
    P90,
    #[serde(rename = "95%")]
    P95,
}

impl ConfidenceLevel {
    /// 所有可识别的标签
    pub const LABELS: [&'static str; 3] = ["80%", "90%", "95%"];

    /// 双侧正态分位数,作为 expected_error 的倍数
    pub fn multiplier(&self) -> f64 {
        match self {
            ConfidenceLevel::P80 => 1.2816,
            ConfidenceLevel::P90 => 1.6449,
            ConfidenceLevel::P95 => 1.9600,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::P80 => "80%",
            ConfidenceLevel::P90 => "90%",
            ConfidenceLevel::P95 => "95%",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ConfidenceLevel {
    type Err = String;

    /// 解析置信水平标签
    ///
    /// 容忍首尾空白,其余必须精确匹配 (不接受 "90" / "0.9")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "80%" => Ok(ConfidenceLevel::P80),
            "90%" => Ok(ConfidenceLevel::P90),
            "95%" => Ok(ConfidenceLevel::P95),
            other => Err(other.to_string()),
        }
    }
}

// ==========================================
// 近期趋势 (Recent Trend)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecentTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl RecentTrend {
    /// 由每小时斜率判定趋势方向
    pub fn from_slope(slope_per_hour: f64) -> Self {
        if slope_per_hour > f64::EPSILON {
            RecentTrend::Increasing
        } else if slope_per_hour < -f64::EPSILON {
            RecentTrend::Decreasing
        } else {
            RecentTrend::Stable
        }
    }
}

// ==========================================
// 预测方法 (Forecast Method)
// ==========================================
// FlatFallback 明确标识为非模型推导的退化预测
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastMethod {
    Trend,
    FlatFallback,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMethod::Trend => write!(f, "TREND"),
            ForecastMethod::FlatFallback => write!(f, "FLAT_FALLBACK"),
        }
    }
}
