// ==========================================
// ICU 运营核心 - API 层
// ==========================================
// 职责: 编排外部协作方调用与纯计算引擎
// 说明: 所有异步 I/O 集中在本层,引擎保持同步无状态
// ==========================================

pub mod collaborators;
pub mod dto;
pub mod error;
pub mod forecast_api;
pub mod triage_api;

// 重导出核心类型
pub use collaborators::{
    CollaboratorError, ExplanationService, OccupancyHistoryStore, RiskClassifier,
};
pub use dto::{ExplainedResult, RankingReport, RankingWarning, WarningKind};
pub use error::{ApiError, ApiResult};
pub use forecast_api::{ForecastApi, DEFAULT_HISTORY_WINDOW_HOURS};
pub use triage_api::TriageApi;
