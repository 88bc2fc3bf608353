use crate::config::core_config::VitalThresholds;
use crate::domain::patient::{RiskAssessment, VitalSigns};

/// 可解释短语
pub mod phrases {
    pub const TACHYCARDIA: &str = "elevated heart rate (tachycardia)";
    pub const BRADYCARDIA: &str = "low heart rate (bradycardia)";
    pub const HYPERTENSION: &str = "high blood pressure";
    pub const HYPOTENSION: &str = "low blood pressure";
    pub const TACHYPNEA: &str = "elevated respiratory rate";
    pub const HYPOXEMIA: &str = "low oxygen saturation";
    pub const FEVER: &str = "fever";
    pub const NORMAL: &str = "vitals within normal range";
    pub const IMMEDIATE_ATTENTION: &str = "requires immediate attention";
    pub const MONITORING: &str = "requires monitoring";
}

/// 生成可解释短语序列
///
/// 扫描顺序固定: 心率 → 收缩压 → 呼吸频率 → 血氧 → 体温，
/// 每类体征至多一个短语（心率、收缩压的高/低互斥）。
/// 无触发 → 仅返回 NORMAL；
/// 有触发 → 追加 risk_flag 决定的结论短语与一位小数的风险分数。
pub(super) fn explain(
    vitals: &VitalSigns,
    assessment: &RiskAssessment,
    thresholds: &VitalThresholds,
) -> Vec<String> {
    let mut triggered: Vec<&'static str> = Vec::new();

    if vitals.heart_rate > thresholds.tachycardia_above {
        triggered.push(phrases::TACHYCARDIA);
    } else if vitals.heart_rate < thresholds.bradycardia_below {
        triggered.push(phrases::BRADYCARDIA);
    }

    if vitals.systolic_bp > thresholds.hypertension_systolic_above {
        triggered.push(phrases::HYPERTENSION);
    } else if vitals.systolic_bp < thresholds.hypotension_systolic_below {
        triggered.push(phrases::HYPOTENSION);
    }

    if vitals.respiratory_rate > thresholds.tachypnea_above {
        triggered.push(phrases::TACHYPNEA);
    }

    if vitals.oxygen_saturation < thresholds.hypoxemia_below {
        triggered.push(phrases::HYPOXEMIA);
    }

    if vitals.temperature > thresholds.fever_above {
        triggered.push(phrases::FEVER);
    }

    if triggered.is_empty() {
        return vec![phrases::NORMAL.to_string()];
    }

    let closing = if assessment.risk_flag {
        phrases::IMMEDIATE_ATTENTION
    } else {
        phrases::MONITORING
    };

    let mut out: Vec<String> = triggered.into_iter().map(str::to_string).collect();
    out.push(closing.to_string());
    out.push(format!("risk score {:.1}", assessment.risk_score));
    out
}
