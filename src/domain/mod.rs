// ==========================================
// ICU 运营核心 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含 I/O,不含引擎逻辑
// ==========================================

pub mod icu;
pub mod occupancy;
pub mod patient;
pub mod priority;
pub mod types;

// 重导出核心类型
pub use icu::{AdmissionDecision, IcuCapacity};
pub use occupancy::{ForecastPoint, ForecastSet, ForecastSummary, OccupancyObservation};
pub use patient::{
    CandidateRecord, PatientCandidate, PatientIntake, RiskAssessment, VitalSigns,
    VitalSignsRecord,
};
pub use priority::PriorityResult;
pub use types::{
    ConfidenceLabel, ConfidenceLevel, DeteriorationRisk, ForecastMethod, RecentTrend,
    RiskCategory, Severity,
};
