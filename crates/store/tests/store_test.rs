//! Integration tests for the in-memory store and its JSON document.

use std::fs;

use chrono::NaiveDate;
use lendbook_core::ledger::{
    CreateAgreementInput, CreateTransactionInput, InstallmentStatus, LedgerError, LedgerReader,
    TransactionKind, TransactionStatus,
};
use lendbook_shared::types::{AgreementId, CalendarMonth, DebtorId, InstallmentId};
use lendbook_store::{InMemoryLedger, LEDGER_DOCUMENT_VERSION, LedgerDocument, StoreError};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn agreement_input(debtor_id: DebtorId) -> CreateAgreementInput {
    CreateAgreementInput {
        debtor_id,
        description: Some("Laptop".to_string()),
        principal: dec!(300),
        monthly_interest_rate: None,
        installment_count: 3,
        first_due_date: date(2026, 1, 15),
    }
}

#[test]
fn test_every_mutation_bumps_revision() {
    let store = InMemoryLedger::new();
    assert_eq!(store.revision(), 0);

    let debtor = store.add_debtor("Carla", None, None).unwrap();
    assert_eq!(store.revision(), 1);

    let created = store.create_agreement(agreement_input(debtor.id)).unwrap();
    assert_eq!(store.revision(), 2);

    store
        .record_payment(
            created.installments[0].id,
            dec!(100),
            date(2026, 1, 10),
            None,
            date(2026, 1, 10),
        )
        .unwrap();
    assert_eq!(store.revision(), 3);

    store
        .add_transaction(CreateTransactionInput {
            kind: TransactionKind::Income,
            description: "Freelance".to_string(),
            category: Some("work".to_string()),
            amount: dec!(750),
            date: date(2026, 1, 20),
            status: TransactionStatus::Paid,
        })
        .unwrap();
    store
        .add_fixed_expense("Rent", dec!(1200), 5, CalendarMonth::new(2026, 1).unwrap())
        .unwrap();
    store
        .add_salary_record(dec!(5000), CalendarMonth::new(2025, 1).unwrap())
        .unwrap();
    assert_eq!(store.revision(), 6);
}

#[test]
fn test_rejected_mutations_leave_revision_alone() {
    let store = InMemoryLedger::new();
    let debtor = store.add_debtor("Davi", None, None).unwrap();
    let revision = store.revision();

    let err = store.create_agreement(agreement_input(DebtorId::new())).unwrap_err();
    assert!(matches!(err, StoreError::DebtorNotFound(_)));

    let mut zero = agreement_input(debtor.id);
    zero.installment_count = 0;
    let err = store.create_agreement(zero).unwrap_err();
    assert!(matches!(err, StoreError::Ledger(LedgerError::Schedule(_))));

    let err = store
        .record_payment(InstallmentId::new(), dec!(1), date(2026, 1, 1), None, date(2026, 1, 1))
        .unwrap_err();
    assert!(matches!(err, StoreError::InstallmentNotFound(_)));

    assert_eq!(store.revision(), revision);
}

#[test]
fn test_overpayment_is_rejected() {
    let store = InMemoryLedger::new();
    let debtor = store.add_debtor("Elisa", None, None).unwrap();
    let created = store.create_agreement(agreement_input(debtor.id)).unwrap();

    let err = store
        .record_payment(
            created.installments[0].id,
            dec!(100.01),
            date(2026, 1, 10),
            None,
            date(2026, 1, 10),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Ledger(LedgerError::Overpayment { .. })
    ));
}

#[test]
fn test_final_payment_settles_agreement() {
    let store = InMemoryLedger::new();
    let debtor = store.add_debtor("Fabio", None, None).unwrap();
    let created = store.create_agreement(agreement_input(debtor.id)).unwrap();

    for installment in &created.installments {
        store
            .record_payment(
                installment.id,
                installment.amount,
                installment.due_date,
                None,
                installment.due_date,
            )
            .unwrap();
    }

    let agreements = store.agreements().unwrap();
    assert!(agreements[0].is_settled);

    let installments = store
        .installments_due_between(date(2026, 1, 1), date(2026, 12, 31))
        .unwrap();
    assert!(
        installments
            .iter()
            .all(|installment| installment.status == InstallmentStatus::Paid)
    );
}

#[test]
fn test_refresh_statuses_marks_overdue() {
    let store = InMemoryLedger::new();
    let debtor = store.add_debtor("Gina", None, None).unwrap();
    store.create_agreement(agreement_input(debtor.id)).unwrap();
    let revision = store.revision();

    let changed = store.refresh_statuses(date(2026, 2, 20)).unwrap();
    assert_eq!(changed, 2);
    assert_eq!(store.revision(), revision + 1);

    let unchanged = store.refresh_statuses(date(2026, 2, 20)).unwrap();
    assert_eq!(unchanged, 0);
    assert_eq!(store.revision(), revision + 1);
}

#[test]
fn test_range_queries_are_inclusive() {
    let store = InMemoryLedger::new();
    let debtor = store.add_debtor("Hugo", None, None).unwrap();
    store.create_agreement(agreement_input(debtor.id)).unwrap();

    let due = store
        .installments_due_between(date(2026, 1, 15), date(2026, 2, 15))
        .unwrap();
    assert_eq!(due.len(), 2);

    let none = store
        .installments_due_between(date(2026, 1, 16), date(2026, 2, 14))
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_archive_debtor_keeps_history() {
    let store = InMemoryLedger::new();
    let debtor = store.add_debtor("Jonas", None, None).unwrap();
    store.create_agreement(agreement_input(debtor.id)).unwrap();

    let archived = store.archive_debtor(debtor.id).unwrap();

    assert!(archived.is_archived);
    assert!(store.debtors().unwrap()[0].is_archived);
    assert_eq!(store.agreements().unwrap().len(), 1);
    assert!(matches!(
        store.archive_debtor(DebtorId::new()).unwrap_err(),
        StoreError::DebtorNotFound(_)
    ));
}

#[test]
fn test_agreement_installments_in_plan_order() {
    let store = InMemoryLedger::new();
    let debtor = store.add_debtor("Katia", None, None).unwrap();
    let first = store.create_agreement(agreement_input(debtor.id)).unwrap();
    store.create_agreement(agreement_input(debtor.id)).unwrap();

    let installments = store.agreement_installments(first.agreement.id).unwrap();

    let numbers: Vec<u32> = installments.iter().map(|i| i.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(
        installments
            .iter()
            .all(|installment| installment.agreement_id == first.agreement.id)
    );
    assert!(matches!(
        store.agreement_installments(AgreementId::new()).unwrap_err(),
        StoreError::AgreementNotFound(_)
    ));
}

#[test]
fn test_document_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("ledger.json");

    let store = InMemoryLedger::new();
    let debtor = store.add_debtor("Iris", Some("555-0101".to_string()), None).unwrap();
    store.create_agreement(agreement_input(debtor.id)).unwrap();
    store.save(&path).unwrap();

    let reopened = InMemoryLedger::open(&path).unwrap();
    assert_eq!(reopened.document().unwrap(), store.document().unwrap());
    assert_eq!(reopened.revision(), 0);
    assert_eq!(reopened.debtors().unwrap()[0].phone.as_deref(), Some("555-0101"));
}

#[test]
fn test_missing_document_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = InMemoryLedger::open(&dir.path().join("absent.json")).unwrap();

    assert_eq!(store.document().unwrap(), LedgerDocument::default());
    assert!(store.agreements().unwrap().is_empty());
}

#[test]
fn test_corrupt_document_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    fs::write(&path, "{ not json").unwrap();

    let err = InMemoryLedger::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn test_foreign_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    fs::write(&path, r#"{ "version": 99 }"#).unwrap();

    let err = LedgerDocument::load(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::UnsupportedVersion {
            found: 99,
            expected: LEDGER_DOCUMENT_VERSION
        }
    ));
}
