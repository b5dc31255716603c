//! Blood inventory model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row per (blood bank, blood type)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BloodInventory {
    pub id: i64,
    pub blood_bank_id: i64,
    pub blood_type: String,
    pub units_available: i32,
    pub last_updated: DateTime<Utc>,
}

impl BloodInventory {
    pub fn is_low_stock(&self, threshold: i32) -> bool {
        self.units_available < threshold
    }
}

/// Aggregate units per blood type across all banks
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventorySummary {
    pub blood_type: String,
    pub units_available: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetInventoryRequest {
    pub blood_bank_id: i64,
    pub blood_type: String,
    pub units_available: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock() {
        let entry = BloodInventory {
            id: 1,
            blood_bank_id: 2,
            blood_type: "O-".to_string(),
            units_available: 4,
            last_updated: Utc::now(),
        };
        assert!(entry.is_low_stock(10));
        assert!(!entry.is_low_stock(4));
        assert!(!entry.is_low_stock(0));
    }
}
