// ==========================================
// ICU 运营核心 - 导入层
// ==========================================
// 职责: 读取外部文件,生成引擎输入
// 支持: 占用历史 CSV / 候选记录 JSON
// ==========================================

pub mod candidate_json;
pub mod error;
pub mod occupancy_csv;

// 重导出核心类型
pub use candidate_json::{load_candidates, parse_candidates};
pub use error::{ImportError, ImportResult};
pub use occupancy_csv::{load_occupancy_history, parse_occupancy_history, parse_timestamp};

use std::path::Path;

/// 检查文件存在且扩展名匹配
fn ensure_file(path: &Path, expected_ext: &str) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    if let Some(ext) = path.extension() {
        if !ext.eq_ignore_ascii_case(expected_ext) {
            return Err(ImportError::UnsupportedFormat {
                expected: expected_ext.to_string(),
                found: ext.to_string_lossy().to_string(),
            });
        }
    }

    Ok(())
}
