//! Blood inventory repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::inventory::{BloodInventory, InventorySummary};
use crate::utils::errors::LifelinkError;

const INVENTORY_COLUMNS: &str = "id, blood_bank_id, blood_type, units_available, last_updated";

#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Set the absolute unit count for a (bank, blood type) pair,
    /// creating the row when missing
    pub async fn set_units(
        &self,
        blood_bank_id: i64,
        blood_type: &str,
        units_available: i32,
    ) -> Result<BloodInventory, LifelinkError> {
        let entry = sqlx::query_as::<_, BloodInventory>(&format!(
            r#"
            INSERT INTO blood_inventory (blood_bank_id, blood_type, units_available, last_updated)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (blood_bank_id, blood_type)
            DO UPDATE SET units_available = $3, last_updated = $4
            RETURNING {INVENTORY_COLUMNS}
            "#
        ))
        .bind(blood_bank_id)
        .bind(blood_type)
        .bind(units_available)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Adjust a row's unit count by a signed delta. Returns None when the
    /// adjustment would take the count below zero.
    pub async fn adjust_units(
        &self,
        id: i64,
        delta: i32,
    ) -> Result<Option<BloodInventory>, LifelinkError> {
        let entry = sqlx::query_as::<_, BloodInventory>(&format!(
            r#"
            UPDATE blood_inventory
            SET units_available = units_available + $2, last_updated = $3
            WHERE id = $1 AND units_available + $2 >= 0
            RETURNING {INVENTORY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Find the entry for a (bank, blood type) pair
    pub async fn find_by_bank_and_type(
        &self,
        blood_bank_id: i64,
        blood_type: &str,
    ) -> Result<Option<BloodInventory>, LifelinkError> {
        let entry = sqlx::query_as::<_, BloodInventory>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM blood_inventory WHERE blood_bank_id = $1 AND blood_type = $2"
        ))
        .bind(blood_bank_id)
        .bind(blood_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// The best-stocked entry for a blood type across all banks. The
    /// approval workflow debits this row when accepting a request.
    pub async fn find_best_stocked(
        &self,
        blood_type: &str,
    ) -> Result<Option<BloodInventory>, LifelinkError> {
        let entry = sqlx::query_as::<_, BloodInventory>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM blood_inventory WHERE blood_type = $1 ORDER BY units_available DESC, id ASC LIMIT 1"
        ))
        .bind(blood_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// All entries held by a bank
    pub async fn list_by_bank(
        &self,
        blood_bank_id: i64,
    ) -> Result<Vec<BloodInventory>, LifelinkError> {
        let entries = sqlx::query_as::<_, BloodInventory>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM blood_inventory WHERE blood_bank_id = $1 ORDER BY blood_type ASC"
        ))
        .bind(blood_bank_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// A bank's entries under the given unit threshold
    pub async fn list_low_stock(
        &self,
        blood_bank_id: i64,
        threshold: i32,
    ) -> Result<Vec<BloodInventory>, LifelinkError> {
        let entries = sqlx::query_as::<_, BloodInventory>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM blood_inventory WHERE blood_bank_id = $1 AND units_available < $2 ORDER BY units_available ASC"
        ))
        .bind(blood_bank_id)
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Aggregate units per blood type across all banks
    pub async fn summary(&self) -> Result<Vec<InventorySummary>, LifelinkError> {
        let summary = sqlx::query_as::<_, InventorySummary>(
            "SELECT blood_type, COALESCE(SUM(units_available), 0)::int8 AS units_available FROM blood_inventory GROUP BY blood_type ORDER BY blood_type ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Total available units of a blood type across all banks
    pub async fn total_units(&self, blood_type: &str) -> Result<i64, LifelinkError> {
        let total: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(units_available), 0)::int8 FROM blood_inventory WHERE blood_type = $1",
        )
        .bind(blood_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inventory_repository_creation() {
        let pool = PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let repo = InventoryRepository::new(pool);
            assert!(!repo.pool.is_closed());
        }
    }
}
