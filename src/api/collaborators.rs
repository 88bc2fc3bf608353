// ==========================================
// ICU 运营核心 - 外部协作方接口
// ==========================================
// 职责: 定义编排层依赖的外部服务 trait（不包含实现）
// 说明: 风险分类器 / 历史占用存储 / 自然语言解释服务均为不透明协作方,
//       核心只依赖这些接口,不直接访问网络或数据库
// ==========================================

use crate::domain::occupancy::OccupancyObservation;
use crate::domain::patient::RiskAssessment;
use crate::domain::priority::PriorityResult;
use async_trait::async_trait;
use thiserror::Error;

/// 协作方调用失败
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("服务不可用 ({service}): {message}")]
    Unavailable { service: String, message: String },

    #[error("服务超时 ({service})")]
    Timeout { service: String },

    #[error("资源未找到 ({service}): {id}")]
    NotFound { service: String, id: String },
}

impl CollaboratorError {
    pub fn unavailable(service: &str, message: impl Into<String>) -> Self {
        CollaboratorError::Unavailable {
            service: service.to_string(),
            message: message.into(),
        }
    }
}

// ==========================================
// RiskClassifier Trait
// ==========================================
// 实现者: 外部 ML 风险分类服务适配器
#[async_trait]
pub trait RiskClassifier: Send + Sync {
    /// 获取患者的最新风险评估
    async fn assess(&self, patient_id: &str) -> Result<RiskAssessment, CollaboratorError>;
}

// ==========================================
// OccupancyHistoryStore Trait
// ==========================================
// 实现者: 持久化层的占用日志查询适配器
#[async_trait]
pub trait OccupancyHistoryStore: Send + Sync {
    /// 最近 window_hours 小时的占用观测（按时间升序）
    async fn recent_occupancy(
        &self,
        window_hours: u32,
    ) -> Result<Vec<OccupancyObservation>, CollaboratorError>;
}

// ==========================================
// ExplanationService Trait
// ==========================================
// 实现者: 外部自然语言解释服务适配器
#[async_trait]
pub trait ExplanationService: Send + Sync {
    async fn explain(&self, result: &PriorityResult) -> Result<String, CollaboratorError>;
}
