// ==========================================
// ICU 运营核心 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {found}（期望 .{expected}）")]
    UnsupportedFormat { expected: String, found: String },

    #[error("文件读取失败: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(#[from] csv::Error),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(#[from] serde_json::Error),

    // ===== 数据映射错误 =====
    #[error("缺少必需列: {0}")]
    MissingColumn(String),

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("标识重复 (第 {index} 条记录): {identifier}")]
    DuplicateIdentifier { index: usize, identifier: String },

    #[error("时间格式错误 (行 {row}): 期望 RFC3339 或 YYYY-MM-DD HH:MM:SS，实际 {value}")]
    TimestampFormatError { row: usize, value: String },
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
