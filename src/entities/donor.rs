//! Donor entity model with create/update payloads

use crate::core::BloodType;
use crate::core::validation::CONTACT_NUMBER;
use crate::impl_record;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered blood donor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub blood_type: BloodType,
    pub contact_number: String,
    pub address: Option<String>,
    pub medical_complications: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(Donor, "donor", "donors");

impl Donor {
    pub fn new(payload: NewDonor) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            date_of_birth: payload.date_of_birth,
            blood_type: payload.blood_type,
            contact_number: payload.contact_number,
            address: payload.address,
            medical_complications: payload.medical_complications,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: DonorPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = date_of_birth;
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
        if let Some(medical_complications) = patch.medical_complications {
            self.medical_complications = Some(medical_complications);
        }
    }
}

/// Payload for registering a donor
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDonor {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub blood_type: BloodType,
    #[validate(regex(path = *CONTACT_NUMBER, message = "must be 7-15 digits"))]
    pub contact_number: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub medical_complications: Option<String>,
}

/// Partial update for a donor; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DonorPatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub blood_type: Option<BloodType>,
    #[validate(regex(path = *CONTACT_NUMBER, message = "must be 7-15 digits"))]
    pub contact_number: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub medical_complications: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewDonor {
        NewDonor {
            name: "John Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            blood_type: BloodType::APositive,
            contact_number: "1234567890".to_string(),
            address: Some("123 Main St".to_string()),
            medical_complications: None,
        }
    }

    #[test]
    fn test_new_donor_validates() {
        assert!(payload().validate().is_ok());

        let mut bad = payload();
        bad.contact_number = "abc".to_string();
        assert!(bad.validate().is_err());

        let mut bad = payload();
        bad.name = String::new();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_apply_patch() {
        let mut donor = Donor::new(payload());
        donor.apply(DonorPatch {
            name: Some("Jane Doe".to_string()),
            blood_type: Some(BloodType::ONegative),
            ..Default::default()
        });
        assert_eq!(donor.name, "Jane Doe");
        assert_eq!(donor.blood_type, BloodType::ONegative);
        assert_eq!(donor.contact_number, "1234567890");
    }
}
