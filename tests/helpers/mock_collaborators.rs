// ==========================================
// Mock 协作方实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use icu_ops_core::api::{
    CollaboratorError, ExplanationService, OccupancyHistoryStore, RiskClassifier,
};
use icu_ops_core::domain::{OccupancyObservation, PriorityResult, RiskAssessment};
use icu_ops_core::RiskCategory;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock 风险分类器
///
/// 未登记的患者返回 NotFound；登记为失败的患者返回 Unavailable
#[derive(Default)]
pub struct MockClassifier {
    assessments: HashMap<String, RiskAssessment>,
    failing: HashSet<String>,
    delays_ms: HashMap<String, u64>,
    pub calls: AtomicUsize,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, risk_score: f64, category: RiskCategory) -> Self {
        self.assessments.insert(
            id.to_string(),
            RiskAssessment {
                risk_score,
                risk_category: category,
                risk_flag: category == RiskCategory::High,
            },
        );
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    /// 人为延迟，用于验证并发调用不打乱结果归属
    pub fn delayed(mut self, id: &str, ms: u64) -> Self {
        self.delays_ms.insert(id.to_string(), ms);
        self
    }
}

#[async_trait]
impl RiskClassifier for MockClassifier {
    async fn assess(&self, patient_id: &str) -> Result<RiskAssessment, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(ms) = self.delays_ms.get(patient_id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }

        if self.failing.contains(patient_id) {
            return Err(CollaboratorError::unavailable("mock-classifier", "connection refused"));
        }

        self.assessments
            .get(patient_id)
            .copied()
            .ok_or_else(|| CollaboratorError::NotFound {
                service: "mock-classifier".to_string(),
                id: patient_id.to_string(),
            })
    }
}

/// Mock 占用历史存储
pub struct MockHistoryStore {
    history: Option<Vec<OccupancyObservation>>,
    pub last_window: AtomicUsize,
}

impl MockHistoryStore {
    pub fn with_history(history: Vec<OccupancyObservation>) -> Self {
        Self {
            history: Some(history),
            last_window: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            history: None,
            last_window: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl OccupancyHistoryStore for MockHistoryStore {
    async fn recent_occupancy(
        &self,
        window_hours: u32,
    ) -> Result<Vec<OccupancyObservation>, CollaboratorError> {
        self.last_window.store(window_hours as usize, Ordering::SeqCst);
        self.history
            .clone()
            .ok_or_else(|| CollaboratorError::Timeout {
                service: "mock-history".to_string(),
            })
    }
}

/// Mock 解释服务
pub struct MockExplainer {
    pub fail: bool,
}

#[async_trait]
impl ExplanationService for MockExplainer {
    async fn explain(&self, result: &PriorityResult) -> Result<String, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::unavailable("mock-explainer", "quota exceeded"));
        }
        Ok(format!("external narrative for {}", result.identifier))
    }
}
