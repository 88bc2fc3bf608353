use crate::domain::occupancy::OccupancyObservation;

/// 短窗口线性拟合结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    /// 每小时斜率（最小二乘）
    pub slope_per_hour: f64,
    /// 残差标准差（自由度 n-2；n <= 2 时为 0）
    pub residual_std: f64,
}

/// 对窗口内观测做最小二乘直线拟合
///
/// x 取相对窗口首个观测的小时数，因此非整点间隔也能得到"每小时"斜率。
/// 调用方保证窗口非空且时间戳严格递增。
pub fn fit_trend(window: &[OccupancyObservation]) -> TrendFit {
    let n = window.len();
    if n < 2 {
        return TrendFit {
            slope_per_hour: 0.0,
            residual_std: 0.0,
        };
    }

    let origin = window[0].timestamp;
    let xs: Vec<f64> = window
        .iter()
        .map(|o| (o.timestamp - origin).num_seconds() as f64 / 3600.0)
        .collect();
    let ys: Vec<f64> = window.iter().map(|o| o.count as f64).collect();

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let sxx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let sxy: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    // 时间戳严格递增时 sxx > 0
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;

    let residual_std = if n > 2 {
        let ssr: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
            .sum();
        (ssr / (n - 2) as f64).sqrt()
    } else {
        0.0
    };

    TrendFit {
        slope_per_hour: slope,
        residual_std,
    }
}
