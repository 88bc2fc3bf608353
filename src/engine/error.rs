// ==========================================
// ICU 运营核心 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 输入缺失必须显式报错,不得静默补零
// ==========================================

use serde::Serialize;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum EngineError {
    /// 输入字段缺失或不合法
    #[error("输入校验失败 (id={identifier}, 字段 {field}): {message}")]
    Validation {
        identifier: String,
        field: String,
        message: String,
    },

    /// 预测所需历史不足
    #[error("历史数据不足: 至少需要 {required} 个观测，实际 {actual} 个")]
    InsufficientHistory { required: usize, actual: usize },

    /// 无法识别的置信水平
    #[error("无法识别的置信水平: {0}（可选: 80%, 90%, 95%）")]
    InvalidConfidenceLevel(String),
}

impl EngineError {
    pub fn validation(identifier: &str, field: &str, message: impl Into<String>) -> Self {
        EngineError::Validation {
            identifier: identifier.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// 错误类别代码（用于告警与前端展示）
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation { .. } => "VALIDATION",
            EngineError::InsufficientHistory { .. } => "INSUFFICIENT_HISTORY",
            EngineError::InvalidConfidenceLevel(_) => "INVALID_CONFIDENCE_LEVEL",
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
