// ==========================================
// ICU 运营核心 - 配置层
// ==========================================
// 职责: 阈值与参数管理,支持文件 + 环境变量覆写
// 红线: 阈值不得作为隐藏常量埋在引擎逻辑中
// ==========================================

pub mod config_manager;
pub mod core_config;
pub mod error;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, ConfigManager};
pub use core_config::{CoreConfig, ForecastConfig, IcuConfig, TriageConfig, VitalThresholds};
pub use error::{ConfigError, ConfigResult};
