//! Blood stock: the derived inventory aggregate
//!
//! Stock rows are never created directly by users. The ledger upserts them
//! at zero the first time a donation of a given type reaches a bank, and
//! every later mutation flows through the ledger's delta logic.

use crate::core::BloodType;
use crate::impl_record;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key for a stock row: one row per (blood bank, blood type) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockKey {
    pub blood_bank_id: Uuid,
    pub blood_type: BloodType,
}

impl StockKey {
    pub fn new(blood_bank_id: Uuid, blood_type: BloodType) -> Self {
        Self {
            blood_bank_id,
            blood_type,
        }
    }
}

/// Current inventory level for one (blood bank, blood type) pair, in litres
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodStock {
    pub id: Uuid,
    pub blood_bank_id: Uuid,
    pub blood_type: BloodType,
    pub quantity: Decimal,
    pub last_updated: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(BloodStock, "blood_stock", "blood_stocks");

impl BloodStock {
    /// A fresh zero row, created lazily by the ledger's upsert
    pub fn empty(key: StockKey, on: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            blood_bank_id: key.blood_bank_id,
            blood_type: key.blood_type,
            quantity: Decimal::ZERO,
            last_updated: on,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> StockKey {
        StockKey::new(self.blood_bank_id, self.blood_type)
    }
}
