//! Blood bank entity model with create/update payloads

use crate::core::validation::CONTACT_NUMBER;
use crate::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A blood bank holding stock and receiving donations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodBank {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub contact_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(BloodBank, "blood_bank", "blood_banks");

impl BloodBank {
    pub fn new(payload: NewBloodBank) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            location: payload.location,
            contact_number: payload.contact_number,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: BloodBankPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(contact_number) = patch.contact_number {
            self.contact_number = contact_number;
        }
    }
}

/// Payload for registering a blood bank
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBloodBank {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(regex(path = *CONTACT_NUMBER, message = "must be 7-15 digits"))]
    pub contact_number: String,
}

/// Partial update for a blood bank; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BloodBankPatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(regex(path = *CONTACT_NUMBER, message = "must be 7-15 digits"))]
    pub contact_number: Option<String>,
}
