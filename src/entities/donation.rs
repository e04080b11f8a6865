//! Donation entity model with the ledger-facing payloads
//!
//! Donations are created, edited and deleted exclusively through the
//! inventory ledger, which keeps the matching stock row in step. The donor
//! and blood bank references are immutable after creation: re-pointing a
//! committed donation would silently move stock between (bank, type) pairs.

use crate::impl_record;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded blood donation, in litres
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub blood_bank_id: Uuid,
    pub quantity: Decimal,
    pub donation_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(Donation, "donation", "donations");

impl Donation {
    pub fn new(donor_id: Uuid, blood_bank_id: Uuid, quantity: Decimal, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            donor_id,
            blood_bank_id,
            quantity,
            donation_date: date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for recording a donation; the date defaults to today
#[derive(Debug, Clone, Deserialize)]
pub struct NewDonation {
    pub donor_id: Uuid,
    pub blood_bank_id: Uuid,
    pub quantity: Decimal,
    pub donation_date: Option<NaiveDate>,
}

/// Partial update for a committed donation: quantity and date only
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationPatch {
    pub quantity: Option<Decimal>,
    pub donation_date: Option<NaiveDate>,
}
