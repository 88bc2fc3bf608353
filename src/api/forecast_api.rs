// ==========================================
// ICU 运营核心 - 占用预测 API
// ==========================================
// 职责: 从历史存储取观测 + 调用预测引擎 + ICU 容量快照
// ==========================================

use crate::api::collaborators::OccupancyHistoryStore;
use crate::api::error::ApiResult;
use crate::domain::icu::IcuCapacity;
use crate::domain::occupancy::ForecastSet;
use crate::engine::forecast::OccupancyForecaster;
use crate::engine::icu::IcuEngine;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

/// 默认历史窗口（小时）
pub const DEFAULT_HISTORY_WINDOW_HOURS: u32 = 24;

/// 占用预测 API
pub struct ForecastApi {
    history: Arc<dyn OccupancyHistoryStore>,
    forecaster: OccupancyForecaster,
    icu: IcuEngine,
    window_hours: u32,
}

impl ForecastApi {
    /// 创建新的 ForecastApi 实例
    ///
    /// # 参数
    /// - history: 占用历史存储
    /// - forecaster: 预测引擎
    /// - icu: ICU 容量引擎
    pub fn new(
        history: Arc<dyn OccupancyHistoryStore>,
        forecaster: OccupancyForecaster,
        icu: IcuEngine,
    ) -> Self {
        Self {
            history,
            forecaster,
            icu,
            window_hours: DEFAULT_HISTORY_WINDOW_HOURS,
        }
    }

    pub fn with_window_hours(mut self, window_hours: u32) -> Self {
        self.window_hours = window_hours;
        self
    }

    /// 趋势预测（失败即返回错误，不做兜底）
    ///
    /// # 参数
    /// - confidence_level: "80%" / "90%" / "95%"
    /// - base_time: 预测起点
    ///
    /// # 返回
    /// - Err(ApiError::UpstreamUnavailable): 历史存储不可用
    /// - Err(ApiError::InsufficientHistory / InvalidConfidenceLevel / ValidationError)
    #[instrument(skip(self))]
    pub async fn forecast_occupancy(
        &self,
        confidence_level: &str,
        base_time: DateTime<Utc>,
    ) -> ApiResult<ForecastSet> {
        let history = self.history.recent_occupancy(self.window_hours).await?;
        Ok(self.forecaster.forecast(&history, confidence_level, base_time)?)
    }

    /// 趋势预测；历史不足时退回平推预测（method = FlatFallback）
    #[instrument(skip(self))]
    pub async fn forecast_with_fallback(
        &self,
        confidence_level: &str,
        base_time: DateTime<Utc>,
    ) -> ApiResult<ForecastSet> {
        let history = self.history.recent_occupancy(self.window_hours).await?;
        Ok(self
            .forecaster
            .forecast_with_fallback(&history, confidence_level, base_time)?)
    }

    /// 当前 ICU 容量快照
    ///
    /// 占用数取历史存储中的最新观测；没有观测时视为 0
    pub async fn current_capacity(
        &self,
        high_risk_patients: u32,
        at: DateTime<Utc>,
    ) -> ApiResult<IcuCapacity> {
        let history = self.history.recent_occupancy(self.window_hours).await?;
        let occupied = history.last().map(|o| o.count).unwrap_or(0);
        Ok(self.icu.capacity(occupied, high_risk_patients, at))
    }
}
