use super::{phrases, validate_candidate, PriorityEngine};
use crate::config::core_config::TriageConfig;
use crate::domain::patient::{
    CandidateRecord, PatientCandidate, RiskAssessment, VitalSigns, VitalSignsRecord,
};
use crate::domain::types::{DeteriorationRisk, RiskCategory, Severity};
use crate::engine::error::EngineError;
use chrono::{DateTime, Duration, TimeZone, Utc};

// ==========================================
// 测试辅助函数
// ==========================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
}

fn normal_vitals() -> VitalSigns {
    VitalSigns {
        heart_rate: 80.0,
        systolic_bp: 120.0,
        diastolic_bp: 80.0,
        respiratory_rate: 16.0,
        oxygen_saturation: 98.0,
        temperature: 36.8,
        timestamp: now() - Duration::minutes(5),
    }
}

/// 创建测试候选
fn create_candidate(
    identifier: &str,
    risk_score: f64,
    risk_category: RiskCategory,
    wait_minutes: i64,
) -> PatientCandidate {
    PatientCandidate {
        identifier: identifier.to_string(),
        assessment: RiskAssessment {
            risk_score,
            risk_category,
            risk_flag: false,
        },
        vitals: normal_vitals(),
        registration_time: now() - Duration::minutes(wait_minutes),
    }
}

fn engine() -> PriorityEngine {
    PriorityEngine::default()
}

// ==========================================
// 风险分档
// ==========================================

#[test]
fn test_score_at_or_above_65_is_always_critical() {
    let engine = engine();
    for score in [65.0, 70.0, 88.5, 100.0] {
        for category in [RiskCategory::Low, RiskCategory::Moderate, RiskCategory::High] {
            let c = create_candidate("P", score, category, 0);
            let r = engine.classify_candidate(&c, now());
            assert_eq!(r.severity, Severity::Critical);
            assert_eq!(r.deterioration_risk, DeteriorationRisk::High);
            assert_eq!(r.priority_rank, 1);
        }
    }
}

#[test]
fn test_high_category_overrides_low_score() {
    let c = create_candidate("P", 10.0, RiskCategory::High, 0);
    let r = engine().classify_candidate(&c, now());
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(r.priority_rank, 1);
}

#[test]
fn test_moderate_tier_by_score_and_by_category() {
    let engine = engine();

    let by_score = engine.classify_candidate(&create_candidate("A", 45.0, RiskCategory::Low, 0), now());
    assert_eq!(by_score.severity, Severity::Moderate);
    assert_eq!(by_score.deterioration_risk, DeteriorationRisk::Medium);
    assert_eq!(by_score.priority_rank, 4);

    let by_category =
        engine.classify_candidate(&create_candidate("B", 5.0, RiskCategory::Moderate, 0), now());
    assert_eq!(by_category.priority_rank, 4);
}

#[test]
fn test_minor_tier() {
    let r = engine().classify_candidate(&create_candidate("P", 44.9, RiskCategory::Low, 0), now());
    assert_eq!(r.severity, Severity::Minor);
    assert_eq!(r.deterioration_risk, DeteriorationRisk::Low);
    assert_eq!(r.priority_rank, 7);
}

#[test]
fn test_custom_thresholds() {
    let config = TriageConfig {
        critical_risk_threshold: 80.0,
        moderate_risk_threshold: 50.0,
        ..TriageConfig::default()
    };
    let engine = PriorityEngine::new(config);

    let r = engine.classify_candidate(&create_candidate("P", 70.0, RiskCategory::Low, 0), now());
    assert_eq!(r.priority_rank, 4);
}

// ==========================================
// 候诊升档
// ==========================================

#[test]
fn test_escalation_only_above_threshold() {
    let engine = engine();

    let at_45 = engine.classify_candidate(&create_candidate("A", 50.0, RiskCategory::Low, 45), now());
    assert_eq!(at_45.wait_time_minutes, 45);
    assert_eq!(at_45.priority_rank, 4);
    assert!(!at_45.escalated);

    let at_46 = engine.classify_candidate(&create_candidate("B", 50.0, RiskCategory::Low, 46), now());
    assert_eq!(at_46.priority_rank, 3);
    assert!(at_46.escalated);

    let minor = engine.classify_candidate(&create_candidate("C", 10.0, RiskCategory::Low, 300), now());
    assert_eq!(minor.priority_rank, 6);
}

#[test]
fn test_escalation_never_applies_to_critical() {
    let engine = engine();
    let r = engine.classify_candidate(&create_candidate("P", 90.0, RiskCategory::High, 600), now());
    assert_eq!(r.priority_rank, 1);
    assert!(!r.escalated);

    for base in 1..=7u8 {
        let (rank, _) = engine.escalate(base, 10_000);
        assert!(rank >= 1);
        if base == 1 {
            assert_eq!(rank, 1);
        } else {
            assert_eq!(rank, base - 1);
        }
    }
}

#[test]
fn test_registration_in_future_gives_zero_wait() {
    let c = create_candidate("P", 50.0, RiskCategory::Low, -30);
    let r = engine().classify_candidate(&c, now());
    assert_eq!(r.wait_time_minutes, 0);
    assert_eq!(r.priority_rank, 4);
}

// ==========================================
// 置信度
// ==========================================

#[test]
fn test_confidence_score_bounds_and_monotonicity() {
    let engine = engine();
    let mut prev = 0u8;
    for i in 0..=1000 {
        let score = i as f64 / 10.0;
        let c = engine.confidence_score(score);
        assert!((75..=95).contains(&c), "score {} -> {}", score, c);
        assert!(c >= prev);
        prev = c;
    }
    assert_eq!(engine.confidence_score(0.0), 80);
    assert_eq!(engine.confidence_score(70.0), 87);
    assert_eq!(engine.confidence_score(100.0), 90);
}

#[test]
fn test_confidence_score_clamped_by_config() {
    let config = TriageConfig {
        confidence_base: 90.0,
        ..TriageConfig::default()
    };
    let engine = PriorityEngine::new(config);
    assert_eq!(engine.confidence_score(100.0), 95);
}

#[test]
fn test_confidence_score_non_finite_uses_minimum() {
    let engine = engine();
    assert_eq!(engine.confidence_score(f64::NAN), 75);
    assert_eq!(engine.confidence_score(f64::INFINITY), 75);

    let mut c = create_candidate("P", 50.0, RiskCategory::Moderate, 0);
    c.assessment.risk_score = f64::NAN;
    let result = engine.classify_candidate(&c, now());
    assert_eq!(result.confidence_score, 75);
}

// ==========================================
// 可解释短语
// ==========================================

#[test]
fn test_explainability_tachycardia_and_hypoxemia_in_order() {
    let mut c = create_candidate("P", 55.0, RiskCategory::Moderate, 0);
    c.vitals.heart_rate = 110.0;
    c.vitals.oxygen_saturation = 92.0;
    c.vitals.temperature = 37.0;

    let r = engine().classify_candidate(&c, now());
    assert_eq!(
        r.explainability,
        vec![
            phrases::TACHYCARDIA.to_string(),
            phrases::HYPOXEMIA.to_string(),
            phrases::MONITORING.to_string(),
            "risk score 55.0".to_string(),
        ]
    );
    assert!(!r.has_phrase(phrases::FEVER));
}

#[test]
fn test_explainability_normal_vitals() {
    let c = create_candidate("P", 20.0, RiskCategory::Low, 0);
    let r = engine().classify_candidate(&c, now());
    assert_eq!(r.explainability, vec![phrases::NORMAL.to_string()]);
}

#[test]
fn test_explainability_full_scan_with_flag() {
    let mut c = create_candidate("P", 91.26, RiskCategory::High, 0);
    c.assessment.risk_flag = true;
    c.vitals.heart_rate = 50.0;
    c.vitals.systolic_bp = 85.0;
    c.vitals.respiratory_rate = 24.0;
    c.vitals.oxygen_saturation = 88.0;
    c.vitals.temperature = 39.1;

    let r = engine().classify_candidate(&c, now());
    assert_eq!(
        r.explainability,
        vec![
            phrases::BRADYCARDIA,
            phrases::HYPOTENSION,
            phrases::TACHYPNEA,
            phrases::HYPOXEMIA,
            phrases::FEVER,
            phrases::IMMEDIATE_ATTENTION,
            "risk score 91.3",
        ]
    );
}

#[test]
fn test_explainability_thresholds_are_strict() {
    let mut c = create_candidate("P", 20.0, RiskCategory::Low, 0);
    c.vitals.heart_rate = 100.0;
    c.vitals.systolic_bp = 140.0;
    c.vitals.respiratory_rate = 20.0;
    c.vitals.oxygen_saturation = 95.0;
    c.vitals.temperature = 38.0;

    let r = engine().classify_candidate(&c, now());
    assert_eq!(r.explainability, vec![phrases::NORMAL.to_string()]);
}

// ==========================================
// 排序
// ==========================================

#[test]
fn test_critical_before_escalated_moderate() {
    let a = create_candidate("A", 70.0, RiskCategory::Low, 10);
    let b = create_candidate("B", 50.0, RiskCategory::Low, 60);

    let ranked = engine().rank(&[b, a], now());
    assert_eq!(ranked[0].identifier, "A");
    assert_eq!(ranked[0].priority_rank, 1);
    assert_eq!(ranked[1].identifier, "B");
    assert_eq!(ranked[1].priority_rank, 3);
}

#[test]
fn test_tie_break_by_risk_score_descending() {
    let low_1 = create_candidate("L1", 10.0, RiskCategory::Low, 0);
    let low_2 = create_candidate("L2", 30.0, RiskCategory::Low, 0);
    let crit_1 = create_candidate("C1", 66.0, RiskCategory::Low, 0);
    let crit_2 = create_candidate("C2", 99.0, RiskCategory::Low, 0);

    let ranked = engine().rank(&[low_1, crit_1, low_2, crit_2], now());
    let ids: Vec<&str> = ranked.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["C2", "C1", "L2", "L1"]);
}

#[test]
fn test_rank_is_stable_for_equal_keys() {
    let candidates: Vec<PatientCandidate> = ["X", "Y", "Z"]
        .iter()
        .map(|id| create_candidate(id, 50.0, RiskCategory::Moderate, 0))
        .collect();

    let ranked = engine().rank(&candidates, now());
    let ids: Vec<&str> = ranked.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["X", "Y", "Z"]);
}

#[test]
fn test_rank_is_deterministic() {
    let candidates = vec![
        create_candidate("A", 42.0, RiskCategory::Low, 50),
        create_candidate("B", 67.0, RiskCategory::Moderate, 5),
        create_candidate("C", 42.0, RiskCategory::Low, 50),
        create_candidate("D", 48.0, RiskCategory::Low, 0),
    ];
    let engine = engine();
    assert_eq!(engine.rank(&candidates, now()), engine.rank(&candidates, now()));
}

#[test]
fn test_rank_empty() {
    assert!(engine().rank(&[], now()).is_empty());
    let outcome = engine().rank_records(&[], now());
    assert!(outcome.ranked.is_empty());
    assert!(outcome.rejected.is_empty());
}

#[test]
fn test_filter_before_or_after_rank_is_identical() {
    let candidates = vec![
        create_candidate("bed-01", 30.0, RiskCategory::Low, 0),
        create_candidate("bed-02", 80.0, RiskCategory::High, 0),
        create_candidate("ward-03", 50.0, RiskCategory::Moderate, 70),
        create_candidate("BED-04", 55.0, RiskCategory::Moderate, 0),
    ];
    let engine = engine();

    let ranked_all = engine.rank(&candidates, now());
    let filter_after = PriorityEngine::filter_by_identifier(&ranked_all, "bed");

    let subset: Vec<PatientCandidate> = candidates
        .iter()
        .filter(|c| c.identifier.to_lowercase().contains("bed"))
        .cloned()
        .collect();
    let filter_before = engine.rank(&subset, now());

    assert_eq!(filter_after, filter_before);
    assert_eq!(filter_after.len(), 3);
}

#[test]
fn test_filter_empty_query_keeps_everything() {
    let ranked = engine().rank(&[create_candidate("A", 1.0, RiskCategory::Low, 0)], now());
    assert_eq!(PriorityEngine::filter_by_identifier(&ranked, "  ").len(), 1);
}

// ==========================================
// 校验
// ==========================================

#[test]
fn test_missing_oxygen_saturation_is_rejected_not_zeroed() {
    let mut record: CandidateRecord = create_candidate("P", 20.0, RiskCategory::Low, 0).into();
    record.vitals.oxygen_saturation = None;

    let err = engine().classify(&record, now()).unwrap_err();
    match err {
        EngineError::Validation { field, identifier, .. } => {
            assert_eq!(field, "oxygen_saturation");
            assert_eq!(identifier, "P");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_validation_rejects_bad_inputs() {
    let base: CandidateRecord = create_candidate("P", 20.0, RiskCategory::Low, 0).into();

    let mut no_assessment = base.clone();
    no_assessment.assessment = None;
    assert!(validate_candidate(&no_assessment).is_err());

    let mut out_of_range = base.clone();
    if let Some(a) = out_of_range.assessment.as_mut() {
        a.risk_score = 101.0;
    }
    assert!(validate_candidate(&out_of_range).is_err());

    let mut nan_hr = base.clone();
    nan_hr.vitals.heart_rate = Some(f64::NAN);
    assert!(validate_candidate(&nan_hr).is_err());

    let mut blank_id = base.clone();
    blank_id.identifier = "   ".to_string();
    assert!(validate_candidate(&blank_id).is_err());

    let mut no_registration = base.clone();
    no_registration.registration_time = None;
    assert!(validate_candidate(&no_registration).is_err());

    let mut empty_vitals = base;
    empty_vitals.vitals = VitalSignsRecord::default();
    assert!(validate_candidate(&empty_vitals).is_err());
}

#[test]
fn test_rank_records_returns_partial_result() {
    let good_a: CandidateRecord = create_candidate("A", 30.0, RiskCategory::Low, 0).into();
    let good_b: CandidateRecord = create_candidate("B", 75.0, RiskCategory::High, 0).into();
    let mut bad: CandidateRecord = create_candidate("C", 50.0, RiskCategory::Moderate, 0).into();
    bad.vitals.temperature = None;

    let outcome = engine().rank_records(&[good_a, bad, good_b], now());

    let ids: Vec<&str> = outcome.ranked.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["B", "A"]);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].identifier, "C");
    assert_eq!(outcome.rejected[0].error.code(), "VALIDATION");
}
