// ==========================================
// ICU 运营核心 - 核心库
// ==========================================
// 职责: 急诊分诊优先级排序 + ICU 短时占用预测
// 系统定位: 决策支持系统 (临床人员保留最终决定权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 纯计算规则
pub mod engine;

// 导入层 - 外部文件
pub mod importer;

// 配置层 - 阈值与参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 协作方编排
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ConfidenceLabel, ConfidenceLevel, DeteriorationRisk, ForecastMethod, RecentTrend,
    RiskCategory, Severity,
};

// 领域实体
pub use domain::{
    AdmissionDecision, CandidateRecord, ForecastPoint, ForecastSet, ForecastSummary, IcuCapacity,
    OccupancyObservation, PatientCandidate, PatientIntake, PriorityResult, RiskAssessment,
    VitalSigns, VitalSignsRecord,
};

// 引擎
pub use engine::{EngineError, EngineResult, IcuEngine, OccupancyForecaster, PriorityEngine};

// 配置
pub use config::{ConfigManager, CoreConfig};

// API
pub use api::{ApiError, ApiResult, ForecastApi, RankingReport, TriageApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "icu-ops";
