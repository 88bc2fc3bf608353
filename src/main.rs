// ==========================================
// ICU 运营核心 - 命令行入口
// ==========================================
// 用法:
//   icu-ops rank <candidates.json> [now]
//   icu-ops forecast <history.csv> [confidence] [base_time]
//   icu-ops capacity <occupied> [high_risk]
//
// 结果以 JSON 输出到 stdout，日志输出到 stderr
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use icu_ops_core::api::{
    CollaboratorError, ForecastApi, OccupancyHistoryStore, RiskClassifier, TriageApi,
};
use icu_ops_core::config::ConfigManager;
use icu_ops_core::domain::{OccupancyObservation, PatientIntake, RiskAssessment};
use icu_ops_core::importer::{load_candidates, load_occupancy_history, parse_timestamp};
use icu_ops_core::{logging, IcuEngine, OccupancyForecaster, PriorityEngine};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

const USAGE: &str = "\
usage:
  icu-ops rank <candidates.json> [now]
  icu-ops forecast <history.csv> [confidence] [base_time]
  icu-ops capacity <occupied> [high_risk]";

// ==========================================
// 文件驱动的协作方实现
// ==========================================

/// 从候选文件中预先给出的评估结果充当分类器
struct FileClassifier {
    assessments: HashMap<String, RiskAssessment>,
}

#[async_trait]
impl RiskClassifier for FileClassifier {
    async fn assess(&self, patient_id: &str) -> Result<RiskAssessment, CollaboratorError> {
        self.assessments
            .get(patient_id)
            .copied()
            .ok_or_else(|| CollaboratorError::NotFound {
                service: "file-classifier".to_string(),
                id: patient_id.to_string(),
            })
    }
}

/// CSV 文件充当占用历史存储
struct FileHistory {
    history: Vec<OccupancyObservation>,
}

#[async_trait]
impl OccupancyHistoryStore for FileHistory {
    async fn recent_occupancy(
        &self,
        _window_hours: u32,
    ) -> Result<Vec<OccupancyObservation>, CollaboratorError> {
        Ok(self.history.clone())
    }
}

// ==========================================
// 子命令
// ==========================================

async fn run_rank(manager: &ConfigManager, args: &[String]) -> Result<()> {
    let path = PathBuf::from(args.first().ok_or_else(|| anyhow!(USAGE))?);
    let now = parse_time_arg(args.get(1))?;

    let records = load_candidates(&path)
        .with_context(|| format!("无法读取候选文件 {}", path.display()))?;

    let mut assessments = HashMap::new();
    let mut intakes = Vec::with_capacity(records.len());
    for record in records {
        if let Some(assessment) = record.assessment {
            assessments.insert(record.identifier.clone(), assessment);
        }
        intakes.push(PatientIntake {
            identifier: record.identifier,
            vitals: record.vitals,
            registration_time: record.registration_time,
        });
    }

    let api = TriageApi::new(
        Arc::new(FileClassifier { assessments }),
        PriorityEngine::new(manager.config().triage.clone()),
    );
    let report = api.rank_patients(intakes, now).await;

    if report.is_partial() {
        tracing::warn!(warnings = report.warnings.len(), "部分候选未参与排序");
    }
    print_json(&report)
}

async fn run_forecast(manager: &ConfigManager, args: &[String]) -> Result<()> {
    let path = PathBuf::from(args.first().ok_or_else(|| anyhow!(USAGE))?);
    let forecast_config = manager.config().forecast.clone();
    let confidence = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| forecast_config.default_confidence_level.clone());
    let base_time = parse_time_arg(args.get(2))?;

    let history = load_occupancy_history(&path)
        .with_context(|| format!("无法读取占用历史 {}", path.display()))?;

    let api = ForecastApi::new(
        Arc::new(FileHistory { history }),
        OccupancyForecaster::new(forecast_config),
        IcuEngine::new(manager.config().icu.clone()),
    );
    let set = api.forecast_occupancy(&confidence, base_time).await?;
    print_json(&set)
}

fn run_capacity(manager: &ConfigManager, args: &[String]) -> Result<()> {
    let occupied: u32 = args
        .first()
        .ok_or_else(|| anyhow!(USAGE))?
        .parse()
        .context("occupied 必须为非负整数")?;
    let high_risk: u32 = match args.get(1) {
        Some(v) => v.parse().context("high_risk 必须为非负整数")?,
        None => 0,
    };

    let engine = IcuEngine::new(manager.config().icu.clone());
    print_json(&engine.capacity(occupied, high_risk, Utc::now()))
}

// ==========================================
// 工具函数
// ==========================================

/// 未提供时间参数时取当前时间（仅入口读取时钟）
fn parse_time_arg(arg: Option<&String>) -> Result<DateTime<Utc>> {
    match arg {
        Some(raw) => parse_timestamp(raw).ok_or_else(|| anyhow!("无法解析时间: {}", raw)),
        None => Ok(Utc::now()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("ICU_OPS_LOG_FORMAT").as_deref() == Ok("json") {
        logging::init_json();
    } else {
        logging::init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    let manager = ConfigManager::load_default().context("配置加载失败")?;
    tracing::debug!(source = ?manager.source(), "配置已加载");

    match command.as_str() {
        "rank" => run_rank(&manager, rest).await,
        "forecast" => run_forecast(&manager, rest).await,
        "capacity" => run_capacity(&manager, rest),
        other => bail!("未知命令: {}\n{}", other, USAGE),
    }
}
