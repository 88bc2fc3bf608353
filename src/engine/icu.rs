// ==========================================
// ICU 运营核心 - ICU 容量与收治引擎
// ==========================================
// 职责: 床位容量快照 / 高危自动收治判定 / 空床分配
// 输入: 占用数 + 风险评估 + 已占床位号
// 输出: IcuCapacity / AdmissionDecision / 床位号
// 红线: 只做判定,不落库 (收治记录由持久化协作方负责)
// ==========================================

use crate::config::core_config::IcuConfig;
use crate::domain::icu::{AdmissionDecision, IcuCapacity};
use crate::domain::patient::PatientCandidate;
use crate::domain::types::RiskCategory;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

// ==========================================
// IcuEngine - ICU 容量与收治引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct IcuEngine {
    config: IcuConfig,
}

impl IcuEngine {
    pub fn new(config: IcuConfig) -> Self {
        Self { config }
    }

    pub fn total_beds(&self) -> u32 {
        self.config.total_beds
    }

    /// 生成容量快照
    ///
    /// # 参数
    /// - `beds_occupied`: 当前占用床位数（可超过总床位）
    /// - `high_risk_patients`: 在院高危患者数
    /// - `at`: 快照时刻（显式传入）
    pub fn capacity(
        &self,
        beds_occupied: u32,
        high_risk_patients: u32,
        at: DateTime<Utc>,
    ) -> IcuCapacity {
        let total = self.config.total_beds;
        let occupancy_percentage = if total == 0 {
            0.0
        } else {
            ((beds_occupied as f64 / total as f64) * 100.0 * 100.0).round() / 100.0
        };

        IcuCapacity {
            total_beds: total,
            beds_occupied,
            beds_available: total.saturating_sub(beds_occupied),
            occupancy_percentage,
            high_risk_patients,
            timestamp: at,
        }
    }

    /// 收治判定
    ///
    /// 规则: risk_category == HIGH → 自动收治；其余不收治
    pub fn admission_decision(&self, candidate: &PatientCandidate) -> AdmissionDecision {
        let assessment = &candidate.assessment;

        if assessment.risk_category == RiskCategory::High {
            tracing::info!(identifier = %candidate.identifier, "高危患者，判定收治 ICU");
            return AdmissionDecision {
                identifier: candidate.identifier.clone(),
                admit: true,
                reason: format!(
                    "Automatic admission due to HIGH risk classification (score: {:.1})",
                    assessment.risk_score
                ),
            };
        }

        AdmissionDecision {
            identifier: candidate.identifier.clone(),
            admit: false,
            reason: format!(
                "{} risk classification (score: {:.1}) does not require ICU admission",
                assessment.risk_category, assessment.risk_score
            ),
        }
    }

    /// 分配下一个空床
    ///
    /// 依次检查 ICU-01 .. ICU-{total}，全满时返回 ICU-OVERFLOW-{已占数+1}
    pub fn next_available_bed(&self, occupied_beds: &HashSet<String>) -> String {
        (1..=self.config.total_beds)
            .map(|i| format!("ICU-{:02}", i))
            .find(|bed| !occupied_beds.contains(bed))
            .unwrap_or_else(|| format!("ICU-OVERFLOW-{}", occupied_beds.len() + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::{RiskAssessment, VitalSigns};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 8, 0, 0).unwrap()
    }

    fn create_candidate(risk_score: f64, risk_category: RiskCategory) -> PatientCandidate {
        PatientCandidate {
            identifier: "P001".to_string(),
            assessment: RiskAssessment {
                risk_score,
                risk_category,
                risk_flag: false,
            },
            vitals: VitalSigns {
                heart_rate: 80.0,
                systolic_bp: 120.0,
                diastolic_bp: 80.0,
                respiratory_rate: 16.0,
                oxygen_saturation: 98.0,
                temperature: 36.8,
                timestamp: at(),
            },
            registration_time: at(),
        }
    }

    #[test]
    fn test_capacity_snapshot() {
        let engine = IcuEngine::default();
        let cap = engine.capacity(7, 3, at());

        assert_eq!(cap.total_beds, 15);
        assert_eq!(cap.beds_available, 8);
        assert_eq!(cap.occupancy_percentage, 46.67);
        assert_eq!(cap.high_risk_patients, 3);
        assert!(!cap.is_full());
    }

    #[test]
    fn test_capacity_overflow_saturates() {
        let engine = IcuEngine::new(IcuConfig { total_beds: 10 });
        let cap = engine.capacity(12, 12, at());

        assert_eq!(cap.beds_available, 0);
        assert_eq!(cap.occupancy_percentage, 120.0);
        assert!(cap.is_full());
    }

    #[test]
    fn test_admission_only_for_high_category() {
        let engine = IcuEngine::default();

        let high = engine.admission_decision(&create_candidate(72.46, RiskCategory::High));
        assert!(high.admit);
        assert_eq!(
            high.reason,
            "Automatic admission due to HIGH risk classification (score: 72.5)"
        );

        // 分数高但分类器未给 HIGH，不自动收治
        let moderate = engine.admission_decision(&create_candidate(80.0, RiskCategory::Moderate));
        assert!(!moderate.admit);
    }

    #[test]
    fn test_next_available_bed() {
        let engine = IcuEngine::new(IcuConfig { total_beds: 3 });

        let mut occupied: HashSet<String> = HashSet::new();
        assert_eq!(engine.next_available_bed(&occupied), "ICU-01");

        occupied.insert("ICU-01".to_string());
        occupied.insert("ICU-03".to_string());
        assert_eq!(engine.next_available_bed(&occupied), "ICU-02");

        occupied.insert("ICU-02".to_string());
        assert_eq!(engine.next_available_bed(&occupied), "ICU-OVERFLOW-4");
    }
}
