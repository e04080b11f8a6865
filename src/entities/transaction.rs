//! Transaction (issuance) entity model with the ledger-facing payloads
//!
//! A transaction draws a quantity from the stock of the donation's
//! (blood bank, blood type) pair. Like donations, transactions only change
//! through the ledger, and their donation/acceptor references are immutable.

use crate::impl_record;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A withdrawal of blood from inventory, issued to an acceptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub donation_id: Uuid,
    pub acceptor_id: Uuid,
    pub quantity: Decimal,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(Transaction, "transaction", "transactions");

impl Transaction {
    pub fn new(donation_id: Uuid, acceptor_id: Uuid, quantity: Decimal, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            donation_id,
            acceptor_id,
            quantity,
            date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for processing a transaction; the date defaults to today
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub donation_id: Uuid,
    pub acceptor_id: Uuid,
    pub quantity: Decimal,
    pub date: Option<NaiveDate>,
}

/// Partial update for a processed transaction: quantity and date only
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    pub quantity: Option<Decimal>,
    pub date: Option<NaiveDate>,
}
