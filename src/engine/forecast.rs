// ==========================================
// ICU 运营核心 - 短时占用预测引擎
// ==========================================
// 职责: 由最近 3 个观测外推未来 6 小时占用 + 置信区间
// 输入: 有序历史观测 + 置信水平 + 基准时刻
// 输出: ForecastSet (6 点 + 汇总)
// 红线: 不依赖训练产物,不含随机数,历史不足必须显式失败
// ==========================================

mod core;
mod trend;


pub use self::core::OccupancyForecaster;
pub use trend::{fit_trend, TrendFit};

/// 预测步数（契约固定）
pub const FORECAST_HORIZON_HOURS: u32 = 6;

/// 预测所需的最少历史观测数
pub const MIN_HISTORY_POINTS: usize = 3;
