//! Core module containing fundamental traits and types

pub mod blood_type;
pub mod entity;
pub mod error;
pub mod validation;

pub use blood_type::BloodType;
pub use entity::Record;
pub use error::{
    ConfigError, EntityError, ErrorResponse, HemoError, HemoResult, LedgerError, StorageError,
    ValidationError,
};
