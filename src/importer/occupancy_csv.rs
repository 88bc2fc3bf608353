// ==========================================
// ICU 运营核心 - 占用历史 CSV 导入
// ==========================================
// 格式: 表头 timestamp,count (列顺序不限，大小写不敏感)
// 时间: RFC3339，或 "YYYY-MM-DD HH:MM:SS"（按 UTC 解释）
// 说明: 不在此排序/去重，时间顺序由预测引擎校验
// ==========================================

use crate::domain::occupancy::OccupancyObservation;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::ensure_file;
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::instrument;

const COL_TIMESTAMP: &str = "timestamp";
const COL_COUNT: &str = "count";
const NAIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 从文件读取占用历史
#[instrument]
pub fn load_occupancy_history(path: &Path) -> ImportResult<Vec<OccupancyObservation>> {
    ensure_file(path, "csv")?;
    let file = File::open(path)?;
    let history = parse_occupancy_history(file)?;
    tracing::info!(rows = history.len(), "占用历史导入完成");
    Ok(history)
}

/// 从任意 reader 解析占用历史
///
/// 行号从 1 开始计（不含表头）；空白行跳过
pub fn parse_occupancy_history<R: Read>(reader: R) -> ImportResult<Vec<OccupancyObservation>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let ts_idx = column_index(&headers, COL_TIMESTAMP)?;
    let count_idx = column_index(&headers, COL_COUNT)?;

    let mut history = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result?;

        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        let raw_ts = record.get(ts_idx).unwrap_or("");
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| ImportError::TimestampFormatError {
            row,
            value: raw_ts.to_string(),
        })?;

        let raw_count = record.get(count_idx).unwrap_or("");
        let count = raw_count
            .parse::<u32>()
            .map_err(|e| ImportError::TypeConversionError {
                row,
                field: COL_COUNT.to_string(),
                message: format!("{} ({})", e, raw_count),
            })?;

        history.push(OccupancyObservation::new(timestamp, count));
    }

    Ok(history)
}

/// 解析时间戳（RFC3339 优先，其次无时区格式按 UTC）
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn column_index(headers: &[String], name: &str) -> ImportResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ImportError::MissingColumn(name.to_string()))
}
