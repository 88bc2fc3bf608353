// ==========================================
// ICU 运营核心 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("环境变量格式错误 (key: {key}, value: {value}): {message}")]
    EnvValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置值无效 (field: {field}): {message}")]
    InvalidValue { field: String, message: String },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
