use super::trend::fit_trend;
use super::{FORECAST_HORIZON_HOURS, MIN_HISTORY_POINTS};
use crate::config::core_config::ForecastConfig;
use crate::domain::occupancy::{ForecastPoint, ForecastSet, ForecastSummary, OccupancyObservation};
use crate::domain::types::{ConfidenceLabel, ConfidenceLevel, ForecastMethod, RecentTrend};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{DateTime, Duration, Utc};
use tracing::instrument;

/// 展示用时间格式
const TIME_LABEL_FORMAT: &str = "%I:%M %p";

// ==========================================
// OccupancyForecaster - 短时占用预测引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct OccupancyForecaster {
    // 无状态引擎,只持有只读参数
    config: ForecastConfig,
}

impl OccupancyForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 趋势外推预测
    ///
    /// 步骤:
    /// 1) 最近 3 个观测拟合每小时斜率；基线 = 最新观测值
    /// 2) predicted(h) = max(0, round(基线 + 斜率 × h))
    /// 3) expected_error(h) = 倍数 × base_error × sqrt(h)，
    ///    base_error = max(拟合残差标准差, min_base_error)
    /// 4) 区间 = predicted ± ceil(expected_error)，下界截断到 0
    ///
    /// # 错误
    /// - InsufficientHistory: 观测少于 3 个
    /// - InvalidConfidenceLevel: 置信水平不可识别
    /// - Validation: 时间戳非严格递增
    #[instrument(skip(self, history), fields(points = history.len()))]
    pub fn forecast(
        &self,
        history: &[OccupancyObservation],
        confidence_level: &str,
        base_time: DateTime<Utc>,
    ) -> EngineResult<ForecastSet> {
        if history.len() < MIN_HISTORY_POINTS {
            return Err(EngineError::InsufficientHistory {
                required: MIN_HISTORY_POINTS,
                actual: history.len(),
            });
        }

        let level = parse_confidence_level(confidence_level)?;
        ensure_strictly_increasing(history)?;

        let window_len = self.config.trend_window.max(2).min(history.len());
        let window = &history[history.len() - window_len..];
        let fit = fit_trend(window);

        let baseline = history[history.len() - 1].count;
        let base_error = fit.residual_std.max(self.config.min_base_error);

        tracing::debug!(
            baseline,
            slope = fit.slope_per_hour,
            residual_std = fit.residual_std,
            base_error,
            "趋势拟合完成"
        );

        Ok(self.build_set(
            ForecastMethod::Trend,
            baseline,
            fit.slope_per_hour,
            base_error,
            level,
            base_time,
        ))
    }

    /// 退化平推预测（非模型推导）
    ///
    /// 以最新已知占用为常数基线，斜率为 0，误差取 min_base_error。
    /// 结果的 method 为 FlatFallback，调用方必须将其标识为非模型结果。
    ///
    /// # 错误
    /// - InsufficientHistory: 没有任何观测
    /// - InvalidConfidenceLevel
    pub fn flat_forecast(
        &self,
        history: &[OccupancyObservation],
        confidence_level: &str,
        base_time: DateTime<Utc>,
    ) -> EngineResult<ForecastSet> {
        let latest = history.last().ok_or(EngineError::InsufficientHistory {
            required: 1,
            actual: 0,
        })?;
        let level = parse_confidence_level(confidence_level)?;

        Ok(self.build_set(
            ForecastMethod::FlatFallback,
            latest.count,
            0.0,
            self.config.min_base_error,
            level,
            base_time,
        ))
    }

    /// 趋势预测；仅在历史不足时退回平推预测
    ///
    /// 其余错误（置信水平、时间戳顺序）照常返回
    pub fn forecast_with_fallback(
        &self,
        history: &[OccupancyObservation],
        confidence_level: &str,
        base_time: DateTime<Utc>,
    ) -> EngineResult<ForecastSet> {
        match self.forecast(history, confidence_level, base_time) {
            Err(EngineError::InsufficientHistory { actual, .. }) if actual > 0 => {
                tracing::warn!(actual, "历史不足，退回平推预测（非模型结果）");
                self.flat_forecast(history, confidence_level, base_time)
            }
            other => other,
        }
    }

    // ==========================================
    // 预测点构造
    // ==========================================

    fn build_set(
        &self,
        method: ForecastMethod,
        baseline: u32,
        slope_per_hour: f64,
        base_error: f64,
        level: ConfidenceLevel,
        base_time: DateTime<Utc>,
    ) -> ForecastSet {
        let points: Vec<ForecastPoint> = (1..=FORECAST_HORIZON_HOURS)
            .map(|h| self.build_point(h, baseline, slope_per_hour, base_error, level, base_time))
            .collect();

        let summary = summarize(&points, base_time);

        ForecastSet {
            points,
            summary,
            method,
            confidence_level: level,
            baseline,
            slope_per_hour,
            recent_trend: RecentTrend::from_slope(slope_per_hour),
            base_time,
        }
    }

    fn build_point(
        &self,
        hour_offset: u32,
        baseline: u32,
        slope_per_hour: f64,
        base_error: f64,
        level: ConfidenceLevel,
        base_time: DateTime<Utc>,
    ) -> ForecastPoint {
        let h = hour_offset as f64;

        let raw = baseline as f64 + slope_per_hour * h;
        let predicted_count = raw.round().max(0.0) as u32;

        let expected_error = round2(level.multiplier() * base_error * h.sqrt());
        let half_width = expected_error.ceil() as u32;

        let timestamp = base_time + Duration::hours(i64::from(hour_offset));

        ForecastPoint {
            hour_offset,
            timestamp,
            time_label: timestamp.format(TIME_LABEL_FORMAT).to_string(),
            predicted_count,
            lower_bound: predicted_count.saturating_sub(half_width),
            upper_bound: predicted_count.saturating_add(half_width),
            confidence_label: self.confidence_label(hour_offset),
            confidence_interval_label: level.label().to_string(),
            expected_error,
        }
    }

    /// 按步长分档的展示标签
    pub fn confidence_label(&self, hour_offset: u32) -> ConfidenceLabel {
        if hour_offset <= self.config.high_confidence_max_hour {
            ConfidenceLabel::High
        } else if hour_offset <= self.config.medium_confidence_max_hour {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::Low
        }
    }
}

/// 汇总: 总量 + 峰值（并列取最早）
fn summarize(points: &[ForecastPoint], base_time: DateTime<Utc>) -> ForecastSummary {
    let total_predicted = points.iter().map(|p| u64::from(p.predicted_count)).sum();

    let mut peak: Option<&ForecastPoint> = None;
    for p in points {
        match peak {
            Some(best) if p.predicted_count <= best.predicted_count => {}
            _ => peak = Some(p),
        }
    }

    match peak {
        Some(p) => ForecastSummary {
            total_predicted,
            peak_hour: p.timestamp,
            peak_hour_offset: p.hour_offset,
            peak_time_label: p.time_label.clone(),
            peak_count: p.predicted_count,
        },
        None => ForecastSummary {
            total_predicted,
            peak_hour: base_time,
            peak_hour_offset: 0,
            peak_time_label: base_time.format(TIME_LABEL_FORMAT).to_string(),
            peak_count: 0,
        },
    }
}

fn parse_confidence_level(raw: &str) -> EngineResult<ConfidenceLevel> {
    raw.parse::<ConfidenceLevel>()
        .map_err(EngineError::InvalidConfidenceLevel)
}

fn ensure_strictly_increasing(history: &[OccupancyObservation]) -> EngineResult<()> {
    for (i, pair) in history.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(EngineError::validation(
                "occupancy_history",
                "timestamp",
                format!(
                    "第 {} 个观测 ({}) 不晚于前一个观测 ({})",
                    i + 1,
                    pair[1].timestamp,
                    pair[0].timestamp
                ),
            ));
        }
    }
    Ok(())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
