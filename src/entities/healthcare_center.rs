//! Healthcare center entity model with create/update payloads

use crate::core::validation::CONTACT_NUMBER;
use crate::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A healthcare center that can affiliate with blood banks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareCenter {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub contact_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(HealthcareCenter, "healthcare_center", "healthcare_centers");

impl HealthcareCenter {
    pub fn new(payload: NewHealthcareCenter) -> Self {
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

    pub fn apply(&mut self, patch: HealthcareCenterPatch) {
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

/// Payload for registering a healthcare center
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewHealthcareCenter {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(regex(path = *CONTACT_NUMBER, message = "must be 7-15 digits"))]
    pub contact_number: String,
}

/// Partial update for a healthcare center; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HealthcareCenterPatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(regex(path = *CONTACT_NUMBER, message = "must be 7-15 digits"))]
    pub contact_number: Option<String>,
}
