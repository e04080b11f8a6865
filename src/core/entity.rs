//! Record trait defining the shared shape of all persisted entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for every persisted record in the registry.
///
/// All records carry:
/// - id: unique identifier
/// - created_at: creation timestamp
/// - updated_at: last modification timestamp
///
/// The resource names feed URL paths and error messages, so they use the
/// plural/singular convention ("donors" / "donor").
pub trait Record: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "donors")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "donor")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump the update timestamp after a mutation
    fn touch(&mut self);
}

/// Implements [`Record`] for a struct with the standard `id`, `created_at`
/// and `updated_at` fields.
#[macro_export]
macro_rules! impl_record {
    ($type:ident, $singular:literal, $plural:literal) => {
        impl $crate::core::entity::Record for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestRecord {
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    impl_record!(TestRecord, "test_record", "test_records");

    #[test]
    fn test_record_metadata() {
        assert_eq!(TestRecord::resource_name(), "test_records");
        assert_eq!(TestRecord::resource_name_singular(), "test_record");
    }

    #[test]
    fn test_touch_bumps_updated_at() {
        let created = Utc::now();
        let mut record = TestRecord {
            id: Uuid::new_v4(),
            created_at: created,
            updated_at: created,
        };

        record.touch();
        assert!(record.updated_at() >= record.created_at());
        assert_eq!(record.created_at(), created);
    }
}
