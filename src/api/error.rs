// ==========================================
// ICU 运营核心 - API层错误类型
// ==========================================
// 职责: 定义编排层错误类型，转换引擎/协作方错误
// ==========================================

use crate::api::collaborators::CollaboratorError;
use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("历史数据不足: 至少需要 {required} 个观测，实际 {actual} 个")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("无法识别的置信水平: {0}")]
    InvalidConfidenceLevel(String),

    // ==========================================
    // 协作方错误
    // ==========================================
    #[error("上游服务不可用: {0}")]
    UpstreamUnavailable(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation { .. } => ApiError::ValidationError(err.to_string()),
            EngineError::InsufficientHistory { required, actual } => {
                ApiError::InsufficientHistory { required, actual }
            }
            EngineError::InvalidConfidenceLevel(label) => ApiError::InvalidConfidenceLevel(label),
        }
    }
}

impl From<CollaboratorError> for ApiError {
    fn from(err: CollaboratorError) -> Self {
        ApiError::UpstreamUnavailable(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
