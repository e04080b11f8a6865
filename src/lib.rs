//! # Hemobank
//!
//! A blood donor registry and bank inventory service with a transactional
//! stock ledger, exposed over a RESTful API.
//!
//! ## Features
//!
//! - **Registry**: CRUD for donors, acceptors, blood banks, healthcare
//!   centers and center affiliations
//! - **Inventory Ledger**: donations credit and transactions debit the
//!   per-(bank, blood type) stock, with insufficient withdrawals rejected
//!   before any record is written
//! - **Reversals**: editing or deleting a donation or transaction replays
//!   its stock effect, so the ledger always matches the event history
//! - **Referential Integrity**: deletes are restricted while dependents
//!   exist, or cascade on request
//! - **In-Memory Storage**: a single lock over all tables makes every
//!   ledger operation one atomic critical section
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hemobank::prelude::*;
//!
//! let state = AppState::new();
//! let app = hemobank::server::router(state);
//! // hand `app` to axum::serve, or drive it with axum-test in tests
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod ledger;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BloodType, EntityError, ErrorResponse, HemoError, HemoResult, LedgerError, Record,
        StorageError, ValidationError,
    };

    // === Entities ===
    pub use crate::entities::{
        Acceptor, BloodBank, BloodStock, CenterAffiliation, Donation, Donor, HealthcareCenter,
        NewAcceptor, NewBloodBank, NewCenterAffiliation, NewDonation, NewDonor,
        NewHealthcareCenter, NewTransaction, StockKey, Transaction,
    };

    // === Ledger and storage ===
    pub use crate::ledger::InventoryLedger;
    pub use crate::storage::InMemoryStore;

    // === Server ===
    pub use crate::server::AppState;

    // === Config ===
    pub use crate::config::AppConfig;
}
