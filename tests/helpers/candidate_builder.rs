// ==========================================
// 候选数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, Duration, TimeZone, Utc};
use icu_ops_core::domain::{OccupancyObservation, PatientIntake, VitalSignsRecord};

/// 固定参考时间
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// 正常范围内的体征
pub fn normal_vitals(at: DateTime<Utc>) -> VitalSignsRecord {
    VitalSignsRecord {
        heart_rate: Some(80.0),
        systolic_bp: Some(120.0),
        diastolic_bp: Some(80.0),
        respiratory_rate: Some(16.0),
        oxygen_saturation: Some(98.0),
        temperature: Some(36.8),
        timestamp: Some(at),
    }
}

// ==========================================
// PatientIntake 构建器
// ==========================================

pub struct IntakeBuilder {
    identifier: String,
    vitals: VitalSignsRecord,
    wait_minutes: Option<i64>,
}

impl IntakeBuilder {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            vitals: normal_vitals(fixed_now()),
            wait_minutes: Some(0),
        }
    }

    pub fn waited(mut self, minutes: i64) -> Self {
        self.wait_minutes = Some(minutes);
        self
    }

    pub fn no_registration(mut self) -> Self {
        self.wait_minutes = None;
        self
    }

    pub fn heart_rate(mut self, v: f64) -> Self {
        self.vitals.heart_rate = Some(v);
        self
    }

    pub fn oxygen(mut self, v: f64) -> Self {
        self.vitals.oxygen_saturation = Some(v);
        self
    }

    pub fn missing_temperature(mut self) -> Self {
        self.vitals.temperature = None;
        self
    }

    pub fn build(self) -> PatientIntake {
        PatientIntake {
            identifier: self.identifier,
            vitals: self.vitals,
            registration_time: self
                .wait_minutes
                .map(|m| fixed_now() - Duration::minutes(m)),
        }
    }
}

/// 按小时间隔构造占用历史（最后一个观测位于 end）
pub fn hourly_history(counts: &[u32], end: DateTime<Utc>) -> Vec<OccupancyObservation> {
    let n = counts.len() as i64;
    counts
        .iter()
        .enumerate()
        .map(|(i, &c)| OccupancyObservation::new(end - Duration::hours(n - 1 - i as i64), c))
        .collect()
}
