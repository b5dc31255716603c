//! Inventory service implementation
//!
//! Blood-bank stock management and the public availability overview.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::config::settings::Settings;
use crate::database::repositories::InventoryRepository;
use crate::models::inventory::{BloodInventory, InventorySummary};
use crate::models::BloodType;
use crate::utils::errors::{LifelinkError, Result};

/// Bank stock view with low-stock flags
#[derive(Debug, Clone, Serialize)]
pub struct BankStock {
    pub inventory: Vec<BloodInventory>,
    pub low_stock: Vec<BloodInventory>,
}

/// Inventory service for stock operations
#[derive(Clone)]
pub struct InventoryService {
    inventory_repository: InventoryRepository,
    settings: Settings,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(inventory_repository: InventoryRepository, settings: Settings) -> Self {
        Self {
            inventory_repository,
            settings,
        }
    }

    /// Set the absolute unit count a bank holds for a blood type
    pub async fn set_units(
        &self,
        blood_bank_id: i64,
        blood_type: &str,
        units_available: i32,
    ) -> Result<BloodInventory> {
        let blood_type = blood_type.parse::<BloodType>()?;

        if units_available < 0 {
            return Err(LifelinkError::InvalidInput(
                "Units available cannot be negative".to_string(),
            ));
        }

        let before = self
            .inventory_repository
            .find_by_bank_and_type(blood_bank_id, blood_type.as_str())
            .await?
            .map(|e| e.units_available)
            .unwrap_or(0);

        let entry = self
            .inventory_repository
            .set_units(blood_bank_id, blood_type.as_str(), units_available)
            .await?;

        crate::utils::logging::log_inventory_change(
            blood_bank_id,
            blood_type.as_str(),
            units_available - before,
            entry.units_available,
        );
        info!(
            blood_bank_id = blood_bank_id,
            blood_type = %blood_type,
            units = units_available,
            "Inventory updated"
        );

        Ok(entry)
    }

    /// A bank's stock with low-stock entries highlighted
    pub async fn bank_stock(&self, blood_bank_id: i64) -> Result<BankStock> {
        let inventory = self.inventory_repository.list_by_bank(blood_bank_id).await?;
        let low_stock = self
            .inventory_repository
            .list_low_stock(blood_bank_id, self.settings.donation.low_stock_threshold)
            .await?;

        Ok(BankStock {
            inventory,
            low_stock,
        })
    }

    /// Public overview: aggregate units per blood type, with every group
    /// present even when no bank stocks it
    pub async fn overview(&self) -> Result<Vec<InventorySummary>> {
        let summary = self.inventory_repository.summary().await?;
        let by_type: HashMap<String, i64> = summary
            .into_iter()
            .map(|entry| (entry.blood_type, entry.units_available))
            .collect();

        Ok(BloodType::ALL
            .iter()
            .map(|bt| InventorySummary {
                blood_type: bt.as_str().to_string(),
                units_available: by_type.get(bt.as_str()).copied().unwrap_or(0),
            })
            .collect())
    }
}
