// ==========================================
// ICU 运营核心 - 患者候选领域模型
// ==========================================
// 职责: 生命体征快照 / 风险评估 / 排序候选
// 说明: *Record 为上游原始输入(字段可缺失),校验后得到强类型实体
// ==========================================

use crate::domain::types::RiskCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// VitalSigns - 生命体征快照 (已校验)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub heart_rate: f64,        // 心率 (次/分)
    pub systolic_bp: f64,       // 收缩压 (mmHg)
    pub diastolic_bp: f64,      // 舒张压 (mmHg)
    pub respiratory_rate: f64,  // 呼吸频率 (次/分)
    pub oxygen_saturation: f64, // 血氧饱和度 (%, 0-100)
    pub temperature: f64,       // 体温 (°C)
    pub timestamp: DateTime<Utc>,
}

// ==========================================
// VitalSignsRecord - 上游原始体征记录
// ==========================================
// 缺失字段保持 None,绝不默认为 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalSignsRecord {
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub systolic_bp: Option<f64>,
    #[serde(default)]
    pub diastolic_bp: Option<f64>,
    #[serde(default)]
    pub respiratory_rate: Option<f64>,
    #[serde(default)]
    pub oxygen_saturation: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<VitalSigns> for VitalSignsRecord {
    fn from(v: VitalSigns) -> Self {
        Self {
            heart_rate: Some(v.heart_rate),
            systolic_bp: Some(v.systolic_bp),
            diastolic_bp: Some(v.diastolic_bp),
            respiratory_rate: Some(v.respiratory_rate),
            oxygen_saturation: Some(v.oxygen_saturation),
            temperature: Some(v.temperature),
            timestamp: Some(v.timestamp),
        }
    }
}

// ==========================================
// RiskAssessment - 外部风险分类器输出
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,              // 0-100 (含边界)
    pub risk_category: RiskCategory,
    pub risk_flag: bool,              // 升级标记,独立于分数
}

// ==========================================
// PatientCandidate - 排序候选 (已校验)
// ==========================================
// 每次排序临时构造,不持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientCandidate {
    pub identifier: String,
    pub assessment: RiskAssessment,
    pub vitals: VitalSigns,
    pub registration_time: DateTime<Utc>,
}

// ==========================================
// CandidateRecord - 上游原始候选记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub identifier: String,
    #[serde(default)]
    pub assessment: Option<RiskAssessment>,
    #[serde(default)]
    pub vitals: VitalSignsRecord,
    #[serde(default)]
    pub registration_time: Option<DateTime<Utc>>,
}

impl From<PatientCandidate> for CandidateRecord {
    fn from(c: PatientCandidate) -> Self {
        Self {
            identifier: c.identifier,
            assessment: Some(c.assessment),
            vitals: c.vitals.into(),
            registration_time: Some(c.registration_time),
        }
    }
}

// ==========================================
// PatientIntake - 待评估患者 (尚无风险评估)
// ==========================================
// 由编排层送往外部风险分类器取得 RiskAssessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientIntake {
    pub identifier: String,
    #[serde(default)]
    pub vitals: VitalSignsRecord,
    #[serde(default)]
    pub registration_time: Option<DateTime<Utc>>,
}

impl PatientIntake {
    /// 附加风险评估,得到待校验的候选记录
    pub fn with_assessment(self, assessment: RiskAssessment) -> CandidateRecord {
        CandidateRecord {
            identifier: self.identifier,
            assessment: Some(assessment),
            vitals: self.vitals,
            registration_time: self.registration_time,
        }
    }
}
