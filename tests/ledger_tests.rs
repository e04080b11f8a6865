//! End-to-end ledger behavior: donations credit stock, transactions debit
//! it, and every edit or delete replays its stock effect.

use chrono::NaiveDate;
use hemobank::entities::{DonationPatch, TransactionPatch};
use hemobank::prelude::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

struct Fixture {
    ledger: InventoryLedger,
    donor: Donor,
    acceptor: Acceptor,
    bank: BloodBank,
}

fn fixture() -> Fixture {
    let store = InMemoryStore::new();
    let donor = Donor::new(NewDonor {
        name: "Sam Okafor".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1988, 3, 12).unwrap(),
        blood_type: BloodType::ONegative,
        contact_number: "5550001111".to_string(),
        address: Some("12 Hill Rd".to_string()),
        medical_complications: None,
    });
    let acceptor = Acceptor::new(NewAcceptor {
        name: "Priya Nair".to_string(),
        blood_type: BloodType::ONegative,
        contact_number: "5552223333".to_string(),
        address: None,
        health_condition: Some("anemia".to_string()),
    });
    let bank = BloodBank::new(NewBloodBank {
        name: "Central Bank".to_string(),
        location: "Downtown".to_string(),
        contact_number: "5554445555".to_string(),
    });
    store
        .write(|t| {
            t.donors.insert(donor.clone());
            t.acceptors.insert(acceptor.clone());
            t.blood_banks.insert(bank.clone());
        })
        .unwrap();
    Fixture {
        ledger: InventoryLedger::new(store),
        donor,
        acceptor,
        bank,
    }
}

impl Fixture {
    fn donate(&self, quantity: rust_decimal::Decimal) -> Donation {
        self.ledger
            .record_donation(NewDonation {
                donor_id: self.donor.id,
                blood_bank_id: self.bank.id,
                quantity,
                donation_date: None,
            })
            .unwrap()
    }

    fn stock(&self) -> rust_decimal::Decimal {
        self.ledger
            .stock_levels(Some(self.bank.id))
            .unwrap()
            .first()
            .map(|s| s.quantity)
            .unwrap_or_default()
    }
}

#[test]
fn donation_credits_stock_by_its_quantity() {
    let fx = fixture();
    fx.donate(dec!(5));
    assert_eq!(fx.stock(), dec!(5));

    fx.donate(dec!(2.5));
    assert_eq!(fx.stock(), dec!(7.5));
    // Same pair, still one row
    assert_eq!(fx.ledger.stock_levels(Some(fx.bank.id)).unwrap().len(), 1);
}

#[test]
fn transaction_debits_stock_and_exact_drain_reaches_zero() {
    let fx = fixture();
    let donation = fx.donate(dec!(3));

    fx.ledger
        .process_transaction(NewTransaction {
            donation_id: donation.id,
            acceptor_id: fx.acceptor.id,
            quantity: dec!(3),
            date: None,
        })
        .unwrap();

    assert_eq!(fx.stock(), dec!(0));
}

#[test]
fn insufficient_stock_rejects_and_leaves_no_trace() {
    let fx = fixture();
    let donation = fx.donate(dec!(3));

    let err = fx
        .ledger
        .process_transaction(NewTransaction {
            donation_id: donation.id,
            acceptor_id: fx.acceptor.id,
            quantity: dec!(5),
            date: None,
        })
        .unwrap_err();

    assert_eq!(err.error_code(), "INSUFFICIENT_STOCK");
    assert_eq!(fx.stock(), dec!(3));
    let count = fx
        .ledger
        .store()
        .read(|t| t.transactions.len())
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn transaction_against_missing_stock_row_is_stock_not_found() {
    let fx = fixture();
    let donation = fx.donate(dec!(2));
    // Drop the stock row out from under the donation
    fx.ledger
        .store()
        .write(|t| {
            let key = StockKey::new(fx.bank.id, BloodType::ONegative);
            t.remove_stock(&key);
        })
        .unwrap();

    let err = fx
        .ledger
        .process_transaction(NewTransaction {
            donation_id: donation.id,
            acceptor_id: fx.acceptor.id,
            quantity: dec!(1),
            date: None,
        })
        .unwrap_err();
    assert_eq!(err.error_code(), "STOCK_NOT_FOUND");
}

#[test]
fn non_positive_quantities_are_rejected_without_mutation() {
    let fx = fixture();

    let err = fx
        .ledger
        .record_donation(NewDonation {
            donor_id: fx.donor.id,
            blood_bank_id: fx.bank.id,
            quantity: dec!(0),
            donation_date: None,
        })
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");

    let err = fx
        .ledger
        .record_donation(NewDonation {
            donor_id: fx.donor.id,
            blood_bank_id: fx.bank.id,
            quantity: dec!(-1),
            donation_date: None,
        })
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");

    assert!(fx.ledger.stock_levels(None).unwrap().is_empty());
    assert!(fx.ledger.store().read(|t| t.donations.is_empty()).unwrap());
}

#[test]
fn future_dates_are_rejected() {
    let fx = fixture();
    let tomorrow = hemobank::core::validation::today()
        .succ_opt()
        .unwrap();

    let err = fx
        .ledger
        .record_donation(NewDonation {
            donor_id: fx.donor.id,
            blood_bank_id: fx.bank.id,
            quantity: dec!(1),
            donation_date: Some(tomorrow),
        })
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn updating_donation_quantity_applies_the_delta() {
    let fx = fixture();
    let donation = fx.donate(dec!(5));

    let updated = fx
        .ledger
        .update_donation(
            donation.id,
            DonationPatch {
                quantity: Some(dec!(8)),
                donation_date: None,
            },
        )
        .unwrap();

    assert_eq!(updated.quantity, dec!(8));
    assert_eq!(fx.stock(), dec!(8));

    fx.ledger
        .update_donation(
            donation.id,
            DonationPatch {
                quantity: Some(dec!(2)),
                donation_date: None,
            },
        )
        .unwrap();
    assert_eq!(fx.stock(), dec!(2));
}

#[test]
fn deleting_a_donation_subtracts_its_quantity() {
    let fx = fixture();
    let keep = fx.donate(dec!(5));
    let drop = fx.donate(dec!(2));
    assert_eq!(fx.stock(), dec!(7));

    fx.ledger.delete_donation(drop.id, false).unwrap();
    assert_eq!(fx.stock(), dec!(5));
    let remaining = fx.ledger.store().read(|t| t.donations.list()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
}

#[test]
fn deleting_a_donation_with_transactions_is_restricted() {
    let fx = fixture();
    let donation = fx.donate(dec!(5));
    fx.ledger
        .process_transaction(NewTransaction {
            donation_id: donation.id,
            acceptor_id: fx.acceptor.id,
            quantity: dec!(2),
            date: None,
        })
        .unwrap();

    let err = fx.ledger.delete_donation(donation.id, false).unwrap_err();
    assert_eq!(err.error_code(), "CONSTRAINT_VIOLATION");
    assert_eq!(fx.stock(), dec!(3));

    // Cascade reverses the transaction (back to 5) then the donation (to 0)
    fx.ledger.delete_donation(donation.id, true).unwrap();
    assert_eq!(fx.stock(), dec!(0));
    assert!(fx
        .ledger
        .store()
        .read(|t| t.transactions.is_empty())
        .unwrap());
}

#[test]
fn updating_a_transaction_replays_the_difference() {
    let fx = fixture();
    let donation = fx.donate(dec!(10));
    let transaction = fx
        .ledger
        .process_transaction(NewTransaction {
            donation_id: donation.id,
            acceptor_id: fx.acceptor.id,
            quantity: dec!(4),
            date: None,
        })
        .unwrap();
    assert_eq!(fx.stock(), dec!(6));

    // Increase withdraws 2 more
    fx.ledger
        .update_transaction(
            transaction.id,
            TransactionPatch {
                quantity: Some(dec!(6)),
                date: None,
            },
        )
        .unwrap();
    assert_eq!(fx.stock(), dec!(4));

    // Decrease returns 5
    fx.ledger
        .update_transaction(
            transaction.id,
            TransactionPatch {
                quantity: Some(dec!(1)),
                date: None,
            },
        )
        .unwrap();
    assert_eq!(fx.stock(), dec!(9));

    // An increase past the available stock is rejected, nothing changes
    let err = fx
        .ledger
        .update_transaction(
            transaction.id,
            TransactionPatch {
                quantity: Some(dec!(11)),
                date: None,
            },
        )
        .unwrap_err();
    assert_eq!(err.error_code(), "INSUFFICIENT_STOCK");
    assert_eq!(fx.stock(), dec!(9));
    let unchanged = fx
        .ledger
        .store()
        .read(|t| t.transactions.require(&transaction.id).cloned())
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.quantity, dec!(1));
}

#[test]
fn deleting_a_transaction_returns_its_quantity() {
    let fx = fixture();
    let donation = fx.donate(dec!(5));
    let transaction = fx
        .ledger
        .process_transaction(NewTransaction {
            donation_id: donation.id,
            acceptor_id: fx.acceptor.id,
            quantity: dec!(3),
            date: None,
        })
        .unwrap();
    assert_eq!(fx.stock(), dec!(2));

    fx.ledger.delete_transaction(transaction.id).unwrap();
    assert_eq!(fx.stock(), dec!(5));
}

#[test]
fn deleting_a_donor_cascades_through_donations() {
    let fx = fixture();
    let donation = fx.donate(dec!(5));
    fx.ledger
        .process_transaction(NewTransaction {
            donation_id: donation.id,
            acceptor_id: fx.acceptor.id,
            quantity: dec!(1),
            date: None,
        })
        .unwrap();

    let err = fx.ledger.delete_donor(fx.donor.id, false).unwrap_err();
    assert_eq!(err.error_code(), "CONSTRAINT_VIOLATION");

    fx.ledger.delete_donor(fx.donor.id, true).unwrap();
    let (donors, donations, transactions) = fx
        .ledger
        .store()
        .read(|t| (t.donors.len(), t.donations.len(), t.transactions.len()))
        .unwrap();
    assert_eq!((donors, donations, transactions), (0, 0, 0));
    assert_eq!(fx.stock(), dec!(0));
}

#[test]
fn deleting_a_blood_bank_drops_its_stock_rows() {
    let fx = fixture();
    fx.donate(dec!(5));

    let err = fx.ledger.delete_blood_bank(fx.bank.id, false).unwrap_err();
    assert_eq!(err.error_code(), "CONSTRAINT_VIOLATION");

    fx.ledger.delete_blood_bank(fx.bank.id, true).unwrap();
    assert!(fx.ledger.stock_levels(None).unwrap().is_empty());
    assert!(fx.ledger.store().read(|t| t.donations.is_empty()).unwrap());
}

#[test]
fn unknown_references_are_not_found() {
    let fx = fixture();
    let err = fx
        .ledger
        .process_transaction(NewTransaction {
            donation_id: Uuid::new_v4(),
            acceptor_id: fx.acceptor.id,
            quantity: dec!(1),
            date: None,
        })
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[test]
fn concurrent_donations_to_one_pair_all_land() {
    let fx = fixture();

    let handles: Vec<_> = [dec!(2), dec!(3)]
        .into_iter()
        .map(|quantity| {
            let ledger = fx.ledger.clone();
            let donor_id = fx.donor.id;
            let bank_id = fx.bank.id;
            std::thread::spawn(move || {
                ledger
                    .record_donation(NewDonation {
                        donor_id,
                        blood_bank_id: bank_id,
                        quantity,
                        donation_date: None,
                    })
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(fx.stock(), dec!(5));
    assert_eq!(fx.ledger.stock_levels(Some(fx.bank.id)).unwrap().len(), 1);
}

#[test]
fn concurrent_withdrawals_never_oversell() {
    let fx = fixture();
    let donation = fx.donate(dec!(5));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ledger = fx.ledger.clone();
            let donation_id = donation.id;
            let acceptor_id = fx.acceptor.id;
            std::thread::spawn(move || {
                ledger
                    .process_transaction(NewTransaction {
                        donation_id,
                        acceptor_id,
                        quantity: dec!(2),
                        date: None,
                    })
                    .is_ok()
            })
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    // 5 units cover exactly two withdrawals of 2; the rest must fail
    assert_eq!(successes, 2);
    assert_eq!(fx.stock(), dec!(1));
}
