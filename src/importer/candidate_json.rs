// ==========================================
// ICU 运营核心 - 候选记录 JSON 导入
// ==========================================
// 格式: CandidateRecord 数组；缺失字段保留为 None,由引擎逐条校验
// 约束: 标识在文件内唯一
// ==========================================

use crate::domain::patient::CandidateRecord;
use crate::importer::ensure_file;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 从文件读取候选记录
pub fn load_candidates(path: &Path) -> ImportResult<Vec<CandidateRecord>> {
    ensure_file(path, "json")?;
    let file = File::open(path)?;
    let records = parse_candidates(BufReader::new(file))?;
    tracing::info!(count = records.len(), path = %path.display(), "候选记录导入完成");
    Ok(records)
}

/// 解析候选记录
///
/// 重复标识整体拒绝（记录序号从 1 开始）
pub fn parse_candidates<R: Read>(reader: R) -> ImportResult<Vec<CandidateRecord>> {
    let records: Vec<CandidateRecord> = serde_json::from_reader(reader)?;

    let mut seen = HashSet::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if !seen.insert(record.identifier.as_str()) {
            return Err(ImportError::DuplicateIdentifier {
                index: i + 1,
                identifier: record.identifier.clone(),
            });
        }
    }

    Ok(records)
}
