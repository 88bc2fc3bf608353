use crate::domain::patient::{CandidateRecord, PatientCandidate, VitalSigns};
use crate::engine::error::{EngineError, EngineResult};

/// 校验上游候选记录，得到强类型候选
///
/// 规则:
/// - identifier 去空白后非空
/// - assessment 必须存在，risk_score 为 [0, 100] 内的有限数
/// - 六项体征与体征时间戳必须全部存在且为有限数
/// - oxygen_saturation ∈ [0, 100]；心率/血压/呼吸频率不得为负
/// - registration_time 必须存在
///
/// 缺失字段一律报错，绝不按 0 处理
/// （缺失血氧若当作 0% 会误触发 "low oxygen saturation"）
pub fn validate_candidate(record: &CandidateRecord) -> EngineResult<PatientCandidate> {
    let identifier = record.identifier.trim();
    if identifier.is_empty() {
        return Err(EngineError::validation("", "identifier", "标识为空"));
    }

    let assessment = record
        .assessment
        .ok_or_else(|| EngineError::validation(identifier, "assessment", "缺少风险评估"))?;

    if !assessment.risk_score.is_finite() || !(0.0..=100.0).contains(&assessment.risk_score) {
        return Err(EngineError::validation(
            identifier,
            "risk_score",
            format!("风险分数 {} 超出 [0, 100]", assessment.risk_score),
        ));
    }

    let v = &record.vitals;
    let heart_rate = required(identifier, "heart_rate", v.heart_rate)?;
    let systolic_bp = required(identifier, "systolic_bp", v.systolic_bp)?;
    let diastolic_bp = required(identifier, "diastolic_bp", v.diastolic_bp)?;
    let respiratory_rate = required(identifier, "respiratory_rate", v.respiratory_rate)?;
    let oxygen_saturation = required(identifier, "oxygen_saturation", v.oxygen_saturation)?;
    let temperature = required(identifier, "temperature", v.temperature)?;

    for (field, value) in [
        ("heart_rate", heart_rate),
        ("systolic_bp", systolic_bp),
        ("diastolic_bp", diastolic_bp),
        ("respiratory_rate", respiratory_rate),
    ] {
        if value < 0.0 {
            return Err(EngineError::validation(
                identifier,
                field,
                format!("数值 {} 不得为负", value),
            ));
        }
    }

    if !(0.0..=100.0).contains(&oxygen_saturation) {
        return Err(EngineError::validation(
            identifier,
            "oxygen_saturation",
            format!("血氧 {} 超出 [0, 100]", oxygen_saturation),
        ));
    }

    let timestamp = v
        .timestamp
        .ok_or_else(|| EngineError::validation(identifier, "vitals.timestamp", "缺少体征时间戳"))?;

    let registration_time = record.registration_time.ok_or_else(|| {
        EngineError::validation(identifier, "registration_time", "缺少登记时间")
    })?;

    Ok(PatientCandidate {
        identifier: identifier.to_string(),
        assessment,
        vitals: VitalSigns {
            heart_rate,
            systolic_bp,
            diastolic_bp,
            respiratory_rate,
            oxygen_saturation,
            temperature,
            timestamp,
        },
        registration_time,
    })
}

fn required(identifier: &str, field: &str, value: Option<f64>) -> EngineResult<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(EngineError::validation(
            identifier,
            field,
            format!("数值 {} 不是有限数", v),
        )),
        None => Err(EngineError::validation(identifier, field, "字段缺失")),
    }
}
