// ==========================================
// ICU 运营核心 - ICU 容量与收治领域模型
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// IcuCapacity - 床位容量快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcuCapacity {
    pub total_beds: u32,
    pub beds_occupied: u32,
    pub beds_available: u32,        // 超编时为 0
    pub occupancy_percentage: f64,  // 保留两位小数,超编时可 > 100
    pub high_risk_patients: u32,
    pub timestamp: DateTime<Utc>,
}

impl IcuCapacity {
    pub fn is_full(&self) -> bool {
        self.beds_available == 0
    }
}

// ==========================================
// AdmissionDecision - 收治判定
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionDecision {
    pub identifier: String,
    pub admit: bool,
    pub reason: String,
}
