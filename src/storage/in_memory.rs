//! In-memory entity store
//!
//! A single `RwLock` guards all tables, so a `write` closure is the atomic
//! unit for every multi-table mutation: the ledger runs each donation or
//! transaction as one read-modify-write inside one closure, which is what
//! serializes concurrent updates to the same stock row.

use crate::core::Record;
use crate::core::error::{EntityError, StorageError};
use crate::entities::{
    Acceptor, BloodBank, BloodStock, CenterAffiliation, Donation, Donor, HealthcareCenter,
    StockKey, Transaction,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// One table of records, keyed by id
#[derive(Debug)]
pub struct Table<T> {
    rows: HashMap<Uuid, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    /// Insert a record, returning the stored copy
    pub fn insert(&mut self, row: T) -> T {
        self.rows.insert(row.id(), row.clone());
        row
    }

    pub fn get(&self, id: &Uuid) -> Option<&T> {
        self.rows.get(id)
    }

    /// Get a record or fail with `NotFound` named after the resource
    pub fn require(&self, id: &Uuid) -> Result<&T, EntityError> {
        self.rows.get(id).ok_or(EntityError::NotFound {
            resource: T::resource_name_singular(),
            id: *id,
        })
    }

    /// Replace an existing record; fails with `NotFound` if absent
    pub fn update(&mut self, row: T) -> Result<T, EntityError> {
        self.require(&row.id())?;
        self.rows.insert(row.id(), row.clone());
        Ok(row)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<T> {
        self.rows.remove(id)
    }

    pub fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All persisted tables, guarded together by one lock
#[derive(Debug, Default)]
pub struct Tables {
    pub donors: Table<Donor>,
    pub acceptors: Table<Acceptor>,
    pub blood_banks: Table<BloodBank>,
    pub centers: Table<HealthcareCenter>,
    pub affiliations: Table<CenterAffiliation>,
    pub donations: Table<Donation>,
    pub transactions: Table<Transaction>,
    stocks: HashMap<StockKey, BloodStock>,
}

impl Tables {
    pub fn stock(&self, key: &StockKey) -> Option<&BloodStock> {
        self.stocks.get(key)
    }

    pub fn stock_mut(&mut self, key: &StockKey) -> Option<&mut BloodStock> {
        self.stocks.get_mut(key)
    }

    /// The upsert primitive: the existing row for the pair, or a fresh zero
    /// row created on first use. Stock rows are never created any other way.
    pub fn stock_entry(&mut self, key: StockKey, on: NaiveDate) -> &mut BloodStock {
        self.stocks
            .entry(key)
            .or_insert_with(|| BloodStock::empty(key, on))
    }

    pub fn remove_stock(&mut self, key: &StockKey) -> Option<BloodStock> {
        self.stocks.remove(key)
    }

    /// All stock rows, optionally filtered to one bank, ordered by bank then
    /// blood type for stable listings
    pub fn stock_levels(&self, blood_bank_id: Option<Uuid>) -> Vec<BloodStock> {
        let mut levels: Vec<BloodStock> = self
            .stocks
            .values()
            .filter(|s| blood_bank_id.is_none_or(|id| s.blood_bank_id == id))
            .cloned()
            .collect();
        levels.sort_by_key(|s| (s.blood_bank_id, s.blood_type.as_str()));
        levels
    }

    /// Stock rows held by one bank, for cascade deletion
    pub fn stock_keys_for_bank(&self, blood_bank_id: Uuid) -> Vec<StockKey> {
        self.stocks
            .keys()
            .filter(|k| k.blood_bank_id == blood_bank_id)
            .copied()
            .collect()
    }
}

/// Thread-safe in-memory store over [`Tables`]
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only closure against the tables
    pub fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> Result<R, StorageError> {
        let tables = self
            .tables
            .read()
            .map_err(|e| StorageError::LockPoisoned {
                message: e.to_string(),
            })?;
        Ok(f(&tables))
    }

    /// Run a mutating closure against the tables.
    ///
    /// The closure is the transaction scope: callers must perform all
    /// fallible checks before the first mutation so that an error leaves the
    /// tables untouched.
    pub fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> Result<R, StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| StorageError::LockPoisoned {
                message: e.to_string(),
            })?;
        Ok(f(&mut tables))
    }
}
