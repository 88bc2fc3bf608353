// ==========================================
// ICU 运营核心 - 引擎层
// ==========================================
// 职责: 实现纯计算规则引擎
// 红线: 引擎无 I/O、无共享可变状态、不读系统时钟,
//       所有判定必须输出可解释依据
// ==========================================

pub mod error;
pub mod forecast;
pub mod icu;
pub mod narrative;
pub mod priority;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use forecast::{OccupancyForecaster, FORECAST_HORIZON_HOURS, MIN_HISTORY_POINTS};
pub use icu::IcuEngine;
pub use narrative::fallback_narrative;
pub use priority::{CandidateRejection, PriorityEngine, RankingOutcome};
