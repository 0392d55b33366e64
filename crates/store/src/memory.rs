//! In-memory ledger store.

use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, Utc};
use lendbook_core::credit::{DebtorHistory, DebtorHistoryReader};
use lendbook_core::ledger::{
    CreateAgreementInput, CreateTransactionInput, DebtAgreement, Debtor, FixedExpense,
    Installment, LedgerReader, LedgerService, NewAgreement, Payment, PaymentService, ReadError,
    SalaryRecord, Transaction,
};
use lendbook_shared::types::{AgreementId, CalendarMonth, DebtorId, InstallmentId};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::document::LedgerDocument;
use crate::error::StoreError;

#[derive(Debug, Default)]
struct State {
    document: LedgerDocument,
    revision: u64,
}

impl State {
    fn bump(&mut self) {
        self.revision += 1;
    }
}

/// A ledger held in memory behind a read-write lock.
///
/// Every query runs under one read lock, so each answer is a consistent
/// point-in-time view. Every mutation bumps the revision counter.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<State>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing document.
    #[must_use]
    pub fn from_document(document: LedgerDocument) -> Self {
        Self {
            state: RwLock::new(State {
                document,
                revision: 0,
            }),
        }
    }

    /// Loads the document at `path`, or starts empty if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the document's load error for an unreadable file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        LedgerDocument::load_or_default(path).map(Self::from_document)
    }

    /// Saves the current document to `path`.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Json` if writing fails.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        self.read_state()
            .map_err(|_| StoreError::Poisoned)?
            .document
            .save(path)
    }

    /// A copy of the current document.
    ///
    /// # Errors
    ///
    /// Returns `Poisoned` if a writer panicked.
    pub fn document(&self) -> Result<LedgerDocument, StoreError> {
        Ok(self
            .read_state()
            .map_err(|_| StoreError::Poisoned)?
            .document
            .clone())
    }

    /// Debtors, archived ones included.
    ///
    /// # Errors
    ///
    /// Returns `ReadError` if a writer panicked.
    pub fn debtors(&self) -> Result<Vec<Debtor>, ReadError> {
        Ok(self.read_state()?.document.debtors.clone())
    }

    /// Adds a debtor.
    ///
    /// # Errors
    ///
    /// Returns `Ledger` if the name is blank.
    pub fn add_debtor(
        &self,
        name: &str,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Result<Debtor, StoreError> {
        let debtor = LedgerService::create_debtor(name, phone, notes, Utc::now())?;

        let mut state = self.write_state()?;
        state.document.debtors.push(debtor.clone());
        state.bump();

        info!(debtor_id = %debtor.id, revision = state.revision, "added debtor");
        Ok(debtor)
    }

    /// Archives a debtor, keeping its history.
    ///
    /// # Errors
    ///
    /// Returns `DebtorNotFound` for an unknown debtor.
    pub fn archive_debtor(&self, debtor_id: DebtorId) -> Result<Debtor, StoreError> {
        let mut state = self.write_state()?;
        let debtor = state
            .document
            .debtors
            .iter_mut()
            .find(|debtor| debtor.id == debtor_id)
            .ok_or(StoreError::DebtorNotFound(debtor_id))?;
        debtor.is_archived = true;
        let archived = debtor.clone();
        state.bump();

        info!(%debtor_id, "archived debtor");
        Ok(archived)
    }

    /// An agreement's installments in plan order.
    ///
    /// # Errors
    ///
    /// Returns `AgreementNotFound` for an unknown agreement.
    pub fn agreement_installments(
        &self,
        agreement_id: AgreementId,
    ) -> Result<Vec<Installment>, StoreError> {
        let state = self.read_state().map_err(|_| StoreError::Poisoned)?;
        let document = &state.document;
        if !document.agreements.iter().any(|a| a.id == agreement_id) {
            return Err(StoreError::AgreementNotFound(agreement_id));
        }

        let mut installments: Vec<Installment> = document
            .installments
            .iter()
            .filter(|installment| installment.agreement_id == agreement_id)
            .cloned()
            .collect();
        installments.sort_by_key(|installment| installment.number);
        Ok(installments)
    }

    /// Creates an agreement with its installment plan.
    ///
    /// # Errors
    ///
    /// Returns `DebtorNotFound` for an unknown debtor and `Ledger` if the
    /// plan cannot be generated.
    pub fn create_agreement(&self, input: CreateAgreementInput) -> Result<NewAgreement, StoreError> {
        let mut state = self.write_state()?;
        if !state.document.debtors.iter().any(|d| d.id == input.debtor_id) {
            return Err(StoreError::DebtorNotFound(input.debtor_id));
        }

        let created = LedgerService::create_agreement(input, Utc::now())?;
        state.document.agreements.push(created.agreement.clone());
        state
            .document
            .installments
            .extend(created.installments.iter().cloned());
        state.bump();

        Ok(created)
    }

    /// Records a payment against an installment.
    ///
    /// Marks the agreement settled once its last installment is paid.
    ///
    /// # Errors
    ///
    /// Returns `InstallmentNotFound` for an unknown installment and `Ledger`
    /// when the payment is rejected.
    pub fn record_payment(
        &self,
        installment_id: InstallmentId,
        amount: Decimal,
        date: NaiveDate,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<Payment, StoreError> {
        let mut state = self.write_state()?;
        let document = &mut state.document;

        let index = document
            .installments
            .iter()
            .position(|installment| installment.id == installment_id)
            .ok_or(StoreError::InstallmentNotFound(installment_id))?;

        let (payment, updated) =
            PaymentService::register(&document.installments[index], amount, date, notes, today)?;
        let agreement_id = updated.agreement_id;
        document.installments[index] = updated;
        document.payments.push(payment.clone());

        let installments: Vec<Installment> = document
            .installments
            .iter()
            .filter(|installment| installment.agreement_id == agreement_id)
            .cloned()
            .collect();
        if LedgerService::is_settled(&installments)
            && let Some(agreement) = document
                .agreements
                .iter_mut()
                .find(|agreement| agreement.id == agreement_id)
        {
            agreement.is_settled = true;
            info!(%agreement_id, "agreement settled");
        }

        state.bump();
        Ok(payment)
    }

    /// Records a variable income or expense.
    ///
    /// # Errors
    ///
    /// Returns `Ledger` for a non-positive amount.
    pub fn add_transaction(&self, input: CreateTransactionInput) -> Result<Transaction, StoreError> {
        let transaction = LedgerService::create_transaction(input)?;

        let mut state = self.write_state()?;
        state.document.transactions.push(transaction.clone());
        state.bump();

        debug!(transaction_id = %transaction.id, revision = state.revision, "added transaction");
        Ok(transaction)
    }

    /// Adds a recurring fixed expense.
    ///
    /// # Errors
    ///
    /// Returns `Ledger` for a non-positive amount or invalid due day.
    pub fn add_fixed_expense(
        &self,
        name: &str,
        amount: Decimal,
        due_day: u32,
        start_month: CalendarMonth,
    ) -> Result<FixedExpense, StoreError> {
        let expense = LedgerService::create_fixed_expense(name, amount, due_day, start_month)?;

        let mut state = self.write_state()?;
        state.document.fixed_expenses.push(expense.clone());
        state.bump();

        Ok(expense)
    }

    /// Adds a salary record.
    ///
    /// # Errors
    ///
    /// Returns `Ledger` for a non-positive amount.
    pub fn add_salary_record(
        &self,
        amount: Decimal,
        effective_from: CalendarMonth,
    ) -> Result<SalaryRecord, StoreError> {
        let record = LedgerService::create_salary_record(amount, effective_from)?;

        let mut state = self.write_state()?;
        state.document.salary_records.push(record.clone());
        state.bump();

        Ok(record)
    }

    /// Re-derives every installment status as of `today`.
    ///
    /// The revision only moves when a status actually changed.
    ///
    /// # Errors
    ///
    /// Returns `Poisoned` if a writer panicked.
    pub fn refresh_statuses(&self, today: NaiveDate) -> Result<usize, StoreError> {
        let mut state = self.write_state()?;
        let changed = PaymentService::refresh_status(&mut state.document.installments, today);
        if changed > 0 {
            state.bump();
        }
        Ok(changed)
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, State>, ReadError> {
        self.state
            .read()
            .map_err(|_| ReadError::new("ledger store lock poisoned"))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state.write().map_err(|_| StoreError::Poisoned)
    }
}

fn within(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

impl LedgerReader for InMemoryLedger {
    fn revision(&self) -> u64 {
        self.read_state().map_or(0, |state| state.revision)
    }

    fn agreements(&self) -> Result<Vec<DebtAgreement>, ReadError> {
        Ok(self.read_state()?.document.agreements.clone())
    }

    fn installments_due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Installment>, ReadError> {
        let state = self.read_state()?;
        Ok(state
            .document
            .installments
            .iter()
            .filter(|installment| within(installment.due_date, start, end))
            .cloned()
            .collect())
    }

    fn payments_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Payment>, ReadError> {
        let state = self.read_state()?;
        Ok(state
            .document
            .payments
            .iter()
            .filter(|payment| within(payment.date, start, end))
            .cloned()
            .collect())
    }

    fn transactions_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, ReadError> {
        let state = self.read_state()?;
        Ok(state
            .document
            .transactions
            .iter()
            .filter(|transaction| within(transaction.date, start, end))
            .cloned()
            .collect())
    }

    fn salary_records(&self) -> Result<Vec<SalaryRecord>, ReadError> {
        Ok(self.read_state()?.document.salary_records.clone())
    }

    fn fixed_expenses(&self) -> Result<Vec<FixedExpense>, ReadError> {
        Ok(self.read_state()?.document.fixed_expenses.clone())
    }
}

impl DebtorHistoryReader for InMemoryLedger {
    fn debtor_history(&self, debtor_id: DebtorId) -> Result<DebtorHistory, ReadError> {
        let state = self.read_state()?;
        let document = &state.document;

        let agreements: Vec<DebtAgreement> = document
            .agreements
            .iter()
            .filter(|agreement| agreement.debtor_id == debtor_id)
            .cloned()
            .collect();
        let installments: Vec<Installment> = document
            .installments
            .iter()
            .filter(|installment| {
                agreements
                    .iter()
                    .any(|agreement| agreement.id == installment.agreement_id)
            })
            .cloned()
            .collect();
        let payments: Vec<Payment> = document
            .payments
            .iter()
            .filter(|payment| {
                installments
                    .iter()
                    .any(|installment| installment.id == payment.installment_id)
            })
            .cloned()
            .collect();

        Ok(DebtorHistory::assemble(
            debtor_id,
            agreements,
            installments,
            payments,
        ))
    }
}
