use serde::{Deserialize, Serialize};

/// 核心配置（所有阈值显式化，便于测试与审计）
///
/// 文件格式：JSON，缺省字段取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CoreConfig {
    #[serde(default)]
    pub triage: TriageConfig,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub icu: IcuConfig,
}

/// 分诊排序参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// 危重档阈值（risk_score >= 该值 → Critical）
    pub critical_risk_threshold: f64,

    /// 中危档阈值（risk_score >= 该值 → Moderate）
    pub moderate_risk_threshold: f64,

    /// 候诊升档阈值（分钟，严格大于才升档）
    pub wait_escalation_minutes: u32,

    /// 置信度 = clamp(base + risk_score / 10, min, max)
    pub confidence_base: f64,
    pub confidence_min: f64,
    pub confidence_max: f64,

    /// 体征触发阈值
    pub vitals: VitalThresholds,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            critical_risk_threshold: 65.0,
            moderate_risk_threshold: 45.0,
            wait_escalation_minutes: 45,
            confidence_base: 80.0,
            confidence_min: 75.0,
            confidence_max: 95.0,
            vitals: VitalThresholds::default(),
        }
    }
}

/// 体征临床阈值（均为严格比较）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalThresholds {
    pub tachycardia_above: f64,
    pub bradycardia_below: f64,
    pub hypertension_systolic_above: f64,
    pub hypotension_systolic_below: f64,
    pub tachypnea_above: f64,
    pub hypoxemia_below: f64,
    pub fever_above: f64,
}

impl Default for VitalThresholds {
    fn default() -> Self {
        Self {
            tachycardia_above: 100.0,
            bradycardia_below: 60.0,
            hypertension_systolic_above: 140.0,
            hypotension_systolic_below: 90.0,
            tachypnea_above: 20.0,
            hypoxemia_below: 95.0,
            fever_above: 38.0,
        }
    }
}

/// 占用预测参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// 趋势窗口（最近 N 个观测）
    pub trend_window: usize,

    /// 残差不足时的最小基础误差，避免 h=1 出现零宽区间
    pub min_base_error: f64,

    /// h <= 该值 → high
    pub high_confidence_max_hour: u32,

    /// h <= 该值 → medium，其余 → low
    pub medium_confidence_max_hour: u32,

    /// 调用方未指定时使用的置信水平
    pub default_confidence_level: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            trend_window: 3,
            min_base_error: 1.0,
            high_confidence_max_hour: 2,
            medium_confidence_max_hour: 4,
            default_confidence_level: "90%".to_string(),
        }
    }
}

/// ICU 床位参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcuConfig {
    pub total_beds: u32,
}

impl Default for IcuConfig {
    fn default() -> Self {
        Self { total_beds: 15 }
    }
}
