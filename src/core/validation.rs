//! Domain field checks shared by the ledger and the payload types
//!
//! Payload structs use `validator` derive for shape checks (lengths, contact
//! numbers); the checks here guard the ledger's own invariants (positive
//! quantities, no future-dated events) and run before any mutation.

use crate::core::error::ValidationError;
use chrono::{NaiveDate, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

/// Contact numbers: 7 to 15 digits, optional leading `+`.
pub static CONTACT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("contact number regex"));

/// Today's date in UTC, the upper bound for donation/transaction dates.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Check that a quantity is strictly positive.
pub fn positive_quantity(field: &'static str, quantity: Decimal) -> Result<(), ValidationError> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput {
            field,
            message: format!("must be positive (got {quantity})"),
        });
    }
    Ok(())
}

/// Check that an event date is not in the future.
pub fn not_in_future(field: &'static str, date: NaiveDate) -> Result<(), ValidationError> {
    if date > today() {
        return Err(ValidationError::InvalidInput {
            field,
            message: format!("must not be in the future (got {date})"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_quantity() {
        assert!(positive_quantity("quantity", dec!(0.5)).is_ok());
        assert!(positive_quantity("quantity", Decimal::ZERO).is_err());
        assert!(positive_quantity("quantity", dec!(-1)).is_err());
    }

    #[test]
    fn test_not_in_future() {
        assert!(not_in_future("date", today()).is_ok());
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        assert!(not_in_future("date", yesterday).is_ok());
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
        assert!(not_in_future("date", tomorrow).is_err());
    }

    #[test]
    fn test_contact_number_shape() {
        assert!(CONTACT_NUMBER.is_match("1234567890"));
        assert!(CONTACT_NUMBER.is_match("+441234567"));
        assert!(!CONTACT_NUMBER.is_match("12345"));
        assert!(!CONTACT_NUMBER.is_match("phone"));
        assert!(!CONTACT_NUMBER.is_match("123-456-7890"));
    }
}
