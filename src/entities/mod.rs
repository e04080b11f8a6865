//! Entity models: one module per persisted record type

pub mod acceptor;
pub mod affiliation;
pub mod blood_bank;
pub mod donation;
pub mod donor;
pub mod healthcare_center;
pub mod stock;
pub mod transaction;

pub use acceptor::{Acceptor, AcceptorPatch, NewAcceptor};
pub use affiliation::{CenterAffiliation, CenterAffiliationPatch, NewCenterAffiliation};
pub use blood_bank::{BloodBank, BloodBankPatch, NewBloodBank};
pub use donation::{Donation, DonationPatch, NewDonation};
pub use donor::{Donor, DonorPatch, NewDonor};
pub use healthcare_center::{HealthcareCenter, HealthcareCenterPatch, NewHealthcareCenter};
pub use stock::{BloodStock, StockKey};
pub use transaction::{NewTransaction, Transaction, TransactionPatch};
