// ==========================================
// ICU 运营核心 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、合法性校验
// 来源优先级: 环境变量 > 配置文件 > 内置默认值
// ==========================================

use crate::config::core_config::CoreConfig;
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::ConfidenceLevel;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "ICU_OPS_CONFIG_PATH";

    /// 候诊升档阈值（分钟）
    pub const WAIT_ESCALATION_MINUTES: &str = "ICU_OPS_WAIT_ESCALATION_MINUTES";

    /// 危重档风险阈值
    pub const CRITICAL_RISK_THRESHOLD: &str = "ICU_OPS_CRITICAL_RISK_THRESHOLD";

    /// 中危档风险阈值
    pub const MODERATE_RISK_THRESHOLD: &str = "ICU_OPS_MODERATE_RISK_THRESHOLD";

    /// ICU 总床位
    pub const TOTAL_BEDS: &str = "ICU_OPS_TOTAL_BEDS";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: CoreConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 由已有配置创建（校验后）
    pub fn new(config: CoreConfig) -> ConfigResult<Self> {
        validate(&config)?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 从 JSON 文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径（必须存在）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: CoreConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        validate(&config)?;
        tracing::debug!(path = %path.display(), "配置文件已加载");

        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 按默认来源加载，并应用环境变量覆写
    ///
    /// 查找顺序:
    /// 1) ICU_OPS_CONFIG_PATH 指定的文件
    /// 2) <用户配置目录>/icu-ops/config.json
    /// 3) 内置默认值（文件不存在时）
    pub fn load_default() -> ConfigResult<Self> {
        let mut manager = match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            Some(path) => {
                tracing::info!(path = %path.display(), "未找到配置文件，使用内置默认值");
                Self::new(CoreConfig::default())?
            }
            None => Self::new(CoreConfig::default())?,
        };

        manager.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(manager)
    }

    /// 应用覆写
    ///
    /// `lookup` 返回给定键的原始字符串值；空白值视为未设置
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut next = self.config.clone();

        if let Some(v) = read_override::<u32, _>(&lookup, config_keys::WAIT_ESCALATION_MINUTES)? {
            next.triage.wait_escalation_minutes = v;
        }
        if let Some(v) = read_override::<f64, _>(&lookup, config_keys::CRITICAL_RISK_THRESHOLD)? {
            next.triage.critical_risk_threshold = v;
        }
        if let Some(v) = read_override::<f64, _>(&lookup, config_keys::MODERATE_RISK_THRESHOLD)? {
            next.triage.moderate_risk_threshold = v;
        }
        if let Some(v) = read_override::<u32, _>(&lookup, config_keys::TOTAL_BEDS)? {
            next.icu.total_beds = v;
        }

        validate(&next)?;
        self.config = next;
        Ok(())
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn into_config(self) -> CoreConfig {
        self.config
    }

    /// 配置来源文件（默认值时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取配置快照（JSON格式）
    ///
    /// # 用途
    /// - 随预测/排序报告一起记录，便于事后审计阈值
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        serde_json::to_string(&self.config).map_err(|e| ConfigError::InvalidValue {
            field: "*".to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            config: CoreConfig::default(),
            source: None,
        }
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    // 允许通过环境变量显式指定（便于调试/测试/CI）
    if let Ok(path) = std::env::var(config_keys::CONFIG_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join("icu-ops").join("config.json"))
}

fn read_override<T, F>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(key) {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Ok(None),
    };

    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::EnvValueError {
            key: key.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        })
}

// ==========================================
// 配置校验
// ==========================================

/// 校验配置合法性
pub fn validate(config: &CoreConfig) -> ConfigResult<()> {
    let triage = &config.triage;

    let finite_fields = [
        ("triage.critical_risk_threshold", triage.critical_risk_threshold),
        ("triage.moderate_risk_threshold", triage.moderate_risk_threshold),
        ("triage.confidence_base", triage.confidence_base),
        ("triage.confidence_min", triage.confidence_min),
        ("triage.confidence_max", triage.confidence_max),
        ("forecast.min_base_error", config.forecast.min_base_error),
    ];
    for (field, value) in finite_fields {
        if !value.is_finite() {
            return Err(invalid(field, format!("必须为有限数值，实际 {}", value)));
        }
    }

    if triage.moderate_risk_threshold >= triage.critical_risk_threshold {
        return Err(invalid(
            "triage.moderate_risk_threshold",
            format!(
                "中危阈值 {} 必须小于危重阈值 {}",
                triage.moderate_risk_threshold, triage.critical_risk_threshold
            ),
        ));
    }

    if triage.confidence_min > triage.confidence_max {
        return Err(invalid(
            "triage.confidence_min",
            format!(
                "置信度下限 {} 大于上限 {}",
                triage.confidence_min, triage.confidence_max
            ),
        ));
    }

    let forecast = &config.forecast;
    if forecast.trend_window < 2 {
        return Err(invalid(
            "forecast.trend_window",
            format!("趋势窗口至少 2 个观测，实际 {}", forecast.trend_window),
        ));
    }
    if forecast.min_base_error <= 0.0 {
        return Err(invalid(
            "forecast.min_base_error",
            "最小基础误差必须为正数".to_string(),
        ));
    }
    if forecast.high_confidence_max_hour > forecast.medium_confidence_max_hour {
        return Err(invalid(
            "forecast.high_confidence_max_hour",
            "high 档上界不能超过 medium 档上界".to_string(),
        ));
    }
    if ConfidenceLevel::from_str(&forecast.default_confidence_level).is_err() {
        return Err(invalid(
            "forecast.default_confidence_level",
            format!(
                "无法识别的置信水平 {}（可选: {}）",
                forecast.default_confidence_level,
                ConfidenceLevel::LABELS.join(", ")
            ),
        ));
    }

    if config.icu.total_beds == 0 {
        return Err(invalid("icu.total_beds", "床位数必须大于 0".to_string()));
    }

    Ok(())
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message,
    }
}
