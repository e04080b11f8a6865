//! The inventory ledger: every stock mutation in the system goes through here
//!
//! Stock for a (blood bank, blood type) pair must always equal the net of
//! donations minus transactions for that pair. The ledger enforces this by
//! running each operation as a single atomic unit against the store: all
//! checks (`NotFound`, `InvalidInput`, `StockNotFound`, `InsufficientStock`)
//! happen before the first mutation, so a failure leaves no partial state,
//! and the store's write lock serializes concurrent updates to one pair.
//!
//! Edits and deletes of committed donations/transactions funnel through one
//! signed-delta primitive: reversals clamp at zero (a recoverable condition,
//! logged), while forward withdrawals never clamp and reject instead.

use crate::core::entity::Record;
use crate::core::error::{EntityError, HemoResult, LedgerError};
use crate::core::validation::{not_in_future, positive_quantity, today};
use crate::entities::{
    BloodStock, Donation, DonationPatch, NewDonation, NewTransaction, StockKey, Transaction,
    TransactionPatch,
};
use crate::storage::{InMemoryStore, Tables};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

/// Maintains the derived stock aggregate over the entity store.
///
/// Holds an explicit store handle; construct one per store, no globals.
#[derive(Clone)]
pub struct InventoryLedger {
    store: InMemoryStore,
}

impl InventoryLedger {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Record a donation and add its quantity to the matching stock row,
    /// creating the row at zero on first use.
    pub fn record_donation(&self, req: NewDonation) -> HemoResult<Donation> {
        positive_quantity("quantity", req.quantity)?;
        let date = req.donation_date.unwrap_or_else(today);
        not_in_future("donation_date", date)?;

        let donation = self.store.write(|t| -> HemoResult<Donation> {
            let donor = t.donors.require(&req.donor_id)?;
            let blood_type = donor.blood_type;
            t.blood_banks.require(&req.blood_bank_id)?;

            let stock = t.stock_entry(StockKey::new(req.blood_bank_id, blood_type), date);
            stock.quantity += req.quantity;
            stock.last_updated = date;
            stock.touch();

            Ok(t.donations
                .insert(Donation::new(req.donor_id, req.blood_bank_id, req.quantity, date)))
        })??;

        info!(
            donation_id = %donation.id,
            blood_bank_id = %donation.blood_bank_id,
            quantity = %donation.quantity,
            "donation recorded"
        );
        Ok(donation)
    }

    /// Adjust a committed donation's quantity or date, applying the quantity
    /// delta to the matching stock row in the same atomic unit.
    pub fn update_donation(&self, id: Uuid, patch: DonationPatch) -> HemoResult<Donation> {
        if let Some(quantity) = patch.quantity {
            positive_quantity("quantity", quantity)?;
        }
        if let Some(date) = patch.donation_date {
            not_in_future("donation_date", date)?;
        }

        let donation = self.store.write(|t| -> HemoResult<Donation> {
            let mut donation = t.donations.require(&id)?.clone();
            let key = donation_stock_key(t, &donation)?;

            let delta = patch.quantity.map_or(Decimal::ZERO, |q| q - donation.quantity);
            if let Some(quantity) = patch.quantity {
                donation.quantity = quantity;
            }
            if let Some(date) = patch.donation_date {
                donation.donation_date = date;
            }

            adjust_stock(t, key, delta, today());
            donation.touch();
            Ok(t.donations.update(donation)?)
        })??;

        info!(donation_id = %donation.id, "donation updated");
        Ok(donation)
    }

    /// Delete a donation, subtracting its quantity back out of stock
    /// (clamped at zero). Restricted while transactions still reference it
    /// unless `cascade` is set, in which case those transactions are
    /// reversed first within the same atomic unit.
    pub fn delete_donation(&self, id: Uuid, cascade: bool) -> HemoResult<()> {
        self.store.write(|t| delete_donation_inner(t, &id, cascade, today()))??;
        info!(donation_id = %id, cascade, "donation deleted");
        Ok(())
    }

    /// Process a transaction: check sufficiency against the stock of the
    /// donation's (bank, blood type) pair, then create the transaction and
    /// decrement stock as one atomic unit.
    pub fn process_transaction(&self, req: NewTransaction) -> HemoResult<Transaction> {
        positive_quantity("quantity", req.quantity)?;
        let date = req.date.unwrap_or_else(today);
        not_in_future("date", date)?;

        let transaction = self.store.write(|t| -> HemoResult<Transaction> {
            let donation = t.donations.require(&req.donation_id)?.clone();
            t.acceptors.require(&req.acceptor_id)?;
            let key = donation_stock_key(t, &donation)?;

            withdraw_stock(t, key, req.quantity, date)?;

            Ok(t.transactions.insert(Transaction::new(
                req.donation_id,
                req.acceptor_id,
                req.quantity,
                date,
            )))
        })??;

        info!(
            transaction_id = %transaction.id,
            donation_id = %transaction.donation_id,
            quantity = %transaction.quantity,
            "transaction processed"
        );
        Ok(transaction)
    }

    /// Adjust a processed transaction's quantity or date. A quantity
    /// increase is a further withdrawal and re-checks sufficiency; a
    /// decrease returns the difference to stock.
    pub fn update_transaction(&self, id: Uuid, patch: TransactionPatch) -> HemoResult<Transaction> {
        if let Some(quantity) = patch.quantity {
            positive_quantity("quantity", quantity)?;
        }
        if let Some(date) = patch.date {
            not_in_future("date", date)?;
        }

        let transaction = self.store.write(|t| -> HemoResult<Transaction> {
            let mut transaction = t.transactions.require(&id)?.clone();
            let donation = t.donations.require(&transaction.donation_id)?.clone();
            let key = donation_stock_key(t, &donation)?;

            let delta = patch
                .quantity
                .map_or(Decimal::ZERO, |q| q - transaction.quantity);
            if delta > Decimal::ZERO {
                withdraw_stock(t, key, delta, today())?;
            } else if delta < Decimal::ZERO {
                adjust_stock(t, key, -delta, today());
            }

            if let Some(quantity) = patch.quantity {
                transaction.quantity = quantity;
            }
            if let Some(date) = patch.date {
                transaction.date = date;
            }
            transaction.touch();
            Ok(t.transactions.update(transaction)?)
        })??;

        info!(transaction_id = %transaction.id, "transaction updated");
        Ok(transaction)
    }

    /// Delete a transaction, adding its quantity back into stock.
    pub fn delete_transaction(&self, id: Uuid) -> HemoResult<()> {
        self.store.write(|t| delete_transaction_inner(t, &id, today()))??;
        info!(transaction_id = %id, "transaction deleted");
        Ok(())
    }

    /// Current stock rows, optionally filtered to one bank. Read-only.
    pub fn stock_levels(&self, blood_bank_id: Option<Uuid>) -> HemoResult<Vec<BloodStock>> {
        Ok(self.store.read(|t| t.stock_levels(blood_bank_id))?)
    }

    /// Delete a donor. Restricted while donations reference them; with
    /// `cascade`, every donation (and its transactions) is reversed first.
    pub fn delete_donor(&self, id: Uuid, cascade: bool) -> HemoResult<()> {
        self.store.write(|t| -> HemoResult<()> {
            t.donors.require(&id)?;
            let donation_ids: Vec<Uuid> = t
                .donations
                .iter()
                .filter(|d| d.donor_id == id)
                .map(|d| d.id)
                .collect();
            if !donation_ids.is_empty() && !cascade {
                return Err(EntityError::ConstraintViolation {
                    resource: "donor",
                    id,
                    operation: "delete",
                    dependents: donation_ids.len(),
                }
                .into());
            }
            let on = today();
            for donation_id in &donation_ids {
                delete_donation_inner(t, donation_id, true, on)?;
            }
            t.donors.remove(&id);
            Ok(())
        })??;
        info!(donor_id = %id, cascade, "donor deleted");
        Ok(())
    }

    /// Delete an acceptor. Restricted while transactions reference them;
    /// with `cascade`, each transaction is reversed (stock returned) first.
    pub fn delete_acceptor(&self, id: Uuid, cascade: bool) -> HemoResult<()> {
        self.store.write(|t| -> HemoResult<()> {
            t.acceptors.require(&id)?;
            let transaction_ids: Vec<Uuid> = t
                .transactions
                .iter()
                .filter(|x| x.acceptor_id == id)
                .map(|x| x.id)
                .collect();
            if !transaction_ids.is_empty() && !cascade {
                return Err(EntityError::ConstraintViolation {
                    resource: "acceptor",
                    id,
                    operation: "delete",
                    dependents: transaction_ids.len(),
                }
                .into());
            }
            let on = today();
            for transaction_id in &transaction_ids {
                delete_transaction_inner(t, transaction_id, on)?;
            }
            t.acceptors.remove(&id);
            Ok(())
        })??;
        info!(acceptor_id = %id, cascade, "acceptor deleted");
        Ok(())
    }

    /// Delete a blood bank. Restricted while donations or affiliations
    /// reference it; with `cascade`, donations are reversed and the bank's
    /// stock rows and affiliations dropped, all in one atomic unit.
    pub fn delete_blood_bank(&self, id: Uuid, cascade: bool) -> HemoResult<()> {
        self.store.write(|t| -> HemoResult<()> {
            t.blood_banks.require(&id)?;
            let donation_ids: Vec<Uuid> = t
                .donations
                .iter()
                .filter(|d| d.blood_bank_id == id)
                .map(|d| d.id)
                .collect();
            let affiliation_ids: Vec<Uuid> = t
                .affiliations
                .iter()
                .filter(|a| a.blood_bank_id == id)
                .map(|a| a.id)
                .collect();
            let dependents = donation_ids.len() + affiliation_ids.len();
            if dependents > 0 && !cascade {
                return Err(EntityError::ConstraintViolation {
                    resource: "blood_bank",
                    id,
                    operation: "delete",
                    dependents,
                }
                .into());
            }
            let on = today();
            for donation_id in &donation_ids {
                delete_donation_inner(t, donation_id, true, on)?;
            }
            for affiliation_id in &affiliation_ids {
                t.affiliations.remove(affiliation_id);
            }
            for key in t.stock_keys_for_bank(id) {
                t.remove_stock(&key);
            }
            t.blood_banks.remove(&id);
            Ok(())
        })??;
        info!(blood_bank_id = %id, cascade, "blood bank deleted");
        Ok(())
    }

    /// Delete a healthcare center. Restricted while affiliations reference
    /// it unless `cascade` is set.
    pub fn delete_center(&self, id: Uuid, cascade: bool) -> HemoResult<()> {
        self.store.write(|t| -> HemoResult<()> {
            t.centers.require(&id)?;
            let affiliation_ids: Vec<Uuid> = t
                .affiliations
                .iter()
                .filter(|a| a.center_id == id)
                .map(|a| a.id)
                .collect();
            if !affiliation_ids.is_empty() && !cascade {
                return Err(EntityError::ConstraintViolation {
                    resource: "healthcare_center",
                    id,
                    operation: "delete",
                    dependents: affiliation_ids.len(),
                }
                .into());
            }
            for affiliation_id in &affiliation_ids {
                t.affiliations.remove(affiliation_id);
            }
            t.centers.remove(&id);
            Ok(())
        })??;
        info!(center_id = %id, cascade, "healthcare center deleted");
        Ok(())
    }
}

/// Resolve the stock key a donation feeds: its bank plus its donor's type.
fn donation_stock_key(t: &Tables, donation: &Donation) -> Result<StockKey, EntityError> {
    let donor = t.donors.require(&donation.donor_id)?;
    Ok(StockKey::new(donation.blood_bank_id, donor.blood_type))
}

/// Checked forward withdrawal. Fails without touching anything when the row
/// is missing or short.
fn withdraw_stock(
    t: &mut Tables,
    key: StockKey,
    amount: Decimal,
    on: NaiveDate,
) -> Result<(), LedgerError> {
    let stock = t.stock_mut(&key).ok_or(LedgerError::StockNotFound {
        blood_bank_id: key.blood_bank_id,
        blood_type: key.blood_type,
    })?;
    if stock.quantity < amount {
        return Err(LedgerError::InsufficientStock {
            blood_bank_id: key.blood_bank_id,
            blood_type: key.blood_type,
            available: stock.quantity,
            requested: amount,
        });
    }
    stock.quantity -= amount;
    stock.last_updated = on;
    stock.touch();
    Ok(())
}

/// Signed reversal adjustment, clamped at zero. Used by the edit and delete
/// paths; a clamp means earlier edits left the row short of the recorded
/// events and is logged rather than treated as fatal.
fn adjust_stock(t: &mut Tables, key: StockKey, delta: Decimal, on: NaiveDate) {
    if delta == Decimal::ZERO {
        return;
    }
    let stock = t.stock_entry(key, on);
    let next = stock.quantity + delta;
    if next < Decimal::ZERO {
        warn!(
            blood_bank_id = %key.blood_bank_id,
            blood_type = %key.blood_type,
            quantity = %stock.quantity,
            delta = %delta,
            "stock adjustment clamped at zero"
        );
        stock.quantity = Decimal::ZERO;
    } else {
        stock.quantity = next;
    }
    stock.last_updated = on;
    stock.touch();
}

fn delete_transaction_inner(t: &mut Tables, id: &Uuid, on: NaiveDate) -> HemoResult<()> {
    let transaction = t.transactions.require(id)?.clone();
    let donation = t.donations.require(&transaction.donation_id)?.clone();
    let key = donation_stock_key(t, &donation)?;

    adjust_stock(t, key, transaction.quantity, on);
    t.transactions.remove(id);
    Ok(())
}

fn delete_donation_inner(t: &mut Tables, id: &Uuid, cascade: bool, on: NaiveDate) -> HemoResult<()> {
    let donation = t.donations.require(id)?.clone();
    let key = donation_stock_key(t, &donation)?;

    let transaction_ids: Vec<Uuid> = t
        .transactions
        .iter()
        .filter(|x| x.donation_id == *id)
        .map(|x| x.id)
        .collect();
    if !transaction_ids.is_empty() && !cascade {
        return Err(EntityError::ConstraintViolation {
            resource: "donation",
            id: *id,
            operation: "delete",
            dependents: transaction_ids.len(),
        }
        .into());
    }

    for transaction_id in &transaction_ids {
        if let Some(transaction) = t.transactions.remove(transaction_id) {
            adjust_stock(t, key, transaction.quantity, on);
        }
    }
    adjust_stock(t, key, -donation.quantity, on);
    t.donations.remove(id);
    Ok(())
}
