//! Affiliation between a healthcare center and a blood bank

use crate::impl_record;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Links a healthcare center to a blood bank it draws from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterAffiliation {
    pub id: Uuid,
    pub blood_bank_id: Uuid,
    pub center_id: Uuid,
    pub affiliation_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(CenterAffiliation, "center_affiliation", "center_affiliations");

impl CenterAffiliation {
    pub fn new(payload: NewCenterAffiliation, on: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            blood_bank_id: payload.blood_bank_id,
            center_id: payload.center_id,
            affiliation_date: payload.affiliation_date.unwrap_or(on),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: CenterAffiliationPatch) {
        if let Some(affiliation_date) = patch.affiliation_date {
            self.affiliation_date = affiliation_date;
        }
    }
}

/// Payload for recording an affiliation; the date defaults to today
#[derive(Debug, Clone, Deserialize)]
pub struct NewCenterAffiliation {
    pub blood_bank_id: Uuid,
    pub center_id: Uuid,
    pub affiliation_date: Option<NaiveDate>,
}

/// Partial update for an affiliation; only the date can change
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CenterAffiliationPatch {
    pub affiliation_date: Option<NaiveDate>,
}
