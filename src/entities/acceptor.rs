//! Acceptor (recipient) entity model with create/update payloads

use crate::core::BloodType;
use crate::core::validation::CONTACT_NUMBER;
use crate::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered blood recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acceptor {
    pub id: Uuid,
    pub name: String,
    pub blood_type: BloodType,
    pub contact_number: String,
    pub address: Option<String>,
    pub health_condition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(Acceptor, "acceptor", "acceptors");

impl Acceptor {
    pub fn new(payload: NewAcceptor) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            blood_type: payload.blood_type,
            contact_number: payload.contact_number,
            address: payload.address,
            health_condition: payload.health_condition,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: AcceptorPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(blood_type) = patch.blood_type {
            self.blood_type = blood_type;
        }
        if let Some(contact_number) = patch.contact_number {
            self.contact_number = contact_number;
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(health_condition) = patch.health_condition {
            self.health_condition = Some(health_condition);
        }
    }
}

/// Payload for registering an acceptor
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAcceptor {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub blood_type: BloodType,
    #[validate(regex(path = *CONTACT_NUMBER, message = "must be 7-15 digits"))]
    pub contact_number: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub health_condition: Option<String>,
}

/// Partial update for an acceptor; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AcceptorPatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub blood_type: Option<BloodType>,
    #[validate(regex(path = *CONTACT_NUMBER, message = "must be 7-15 digits"))]
    pub contact_number: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub health_condition: Option<String>,
}
