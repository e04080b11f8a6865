//! HTTP handlers, one module per resource

pub mod acceptors;
pub mod affiliations;
pub mod blood_banks;
pub mod donations;
pub mod donors;
pub mod healthcare_centers;
pub mod stocks;
pub mod transactions;

use serde::Deserialize;

/// Query parameters for restricted deletes: `?cascade=true` walks dependent
/// records through the ledger's reversal paths instead of rejecting.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub cascade: bool,
}
