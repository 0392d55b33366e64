//! In-memory ledger readers shared by the unit tests.

use chrono::{NaiveDate, Utc};
use lendbook_shared::types::{
    AgreementId, CalendarMonth, DebtorId, FixedExpenseId, InstallmentId, PaymentId,
    SalaryRecordId, TransactionId,
};
use rust_decimal::Decimal;

use crate::ledger::{
    DebtAgreement, FixedExpense, Installment, InstallmentStatus, LedgerReader, Payment, ReadError,
    SalaryRecord, Transaction, TransactionKind, TransactionStatus,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn month(y: i32, m: u32) -> CalendarMonth {
    CalendarMonth::new(y, m).unwrap()
}

/// A ledger held in plain vectors.
#[derive(Debug, Default, Clone)]
pub struct VecLedger {
    pub revision: u64,
    pub agreements: Vec<DebtAgreement>,
    pub installments: Vec<Installment>,
    pub payments: Vec<Payment>,
    pub transactions: Vec<Transaction>,
    pub salary_records: Vec<SalaryRecord>,
    pub fixed_expenses: Vec<FixedExpense>,
}

impl VecLedger {
    pub fn salary(mut self, amount: Decimal, from: CalendarMonth) -> Self {
        self.salary_records.push(SalaryRecord {
            id: SalaryRecordId::new(),
            amount,
            effective_from: from,
        });
        self
    }

    pub fn fixed(mut self, amount: Decimal, from: CalendarMonth) -> Self {
        self.fixed_expenses.push(FixedExpense {
            id: FixedExpenseId::new(),
            name: "Rent".to_string(),
            amount,
            due_day: 5,
            start_month: from,
            end_month: None,
            is_active: true,
        });
        self
    }

    pub fn transaction(
        mut self,
        kind: TransactionKind,
        amount: Decimal,
        on: NaiveDate,
        status: TransactionStatus,
    ) -> Self {
        self.transactions.push(Transaction {
            id: TransactionId::new(),
            kind,
            description: "entry".to_string(),
            category: None,
            amount,
            date: on,
            status,
        });
        self
    }

    pub fn income(self, amount: Decimal, on: NaiveDate) -> Self {
        self.transaction(TransactionKind::Income, amount, on, TransactionStatus::Paid)
    }

    pub fn expense(self, amount: Decimal, on: NaiveDate) -> Self {
        self.transaction(TransactionKind::Expense, amount, on, TransactionStatus::Paid)
    }

    /// Adds an agreement for a new debtor with one installment per
    /// `(due_date, amount, paid)` triple; paid amounts get a payment on the
    /// due date.
    pub fn agreement(mut self, installments: &[(NaiveDate, Decimal, Decimal)]) -> Self {
        let agreement_id = AgreementId::new();
        let total: Decimal = installments.iter().map(|(_, amount, _)| *amount).sum();
        self.agreements.push(DebtAgreement {
            id: agreement_id,
            debtor_id: DebtorId::new(),
            description: None,
            principal: total,
            monthly_interest_rate: None,
            installment_count: u32::try_from(installments.len()).unwrap(),
            first_due_date: installments[0].0,
            total_amount: total,
            is_settled: false,
            created_at: Utc::now(),
        });

        for (number, (due_date, amount, paid)) in (1u32..).zip(installments) {
            let id = InstallmentId::new();
            self.installments.push(Installment {
                id,
                agreement_id,
                number,
                due_date: *due_date,
                amount: *amount,
                paid_amount: *paid,
                status: InstallmentStatus::Pending,
                paid_at: None,
            });
            if !paid.is_zero() {
                self.payments.push(Payment {
                    id: PaymentId::new(),
                    installment_id: id,
                    date: *due_date,
                    amount: *paid,
                    notes: None,
                });
            }
        }
        self
    }
}

impl LedgerReader for VecLedger {
    fn revision(&self) -> u64 {
        self.revision
    }

    fn agreements(&self) -> Result<Vec<DebtAgreement>, ReadError> {
        Ok(self.agreements.clone())
    }

    fn installments_due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Installment>, ReadError> {
        Ok(self
            .installments
            .iter()
            .filter(|installment| (start..=end).contains(&installment.due_date))
            .cloned()
            .collect())
    }

    fn payments_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Payment>, ReadError> {
        Ok(self
            .payments
            .iter()
            .filter(|payment| (start..=end).contains(&payment.date))
            .cloned()
            .collect())
    }

    fn transactions_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, ReadError> {
        Ok(self
            .transactions
            .iter()
            .filter(|transaction| (start..=end).contains(&transaction.date))
            .cloned()
            .collect())
    }

    fn salary_records(&self) -> Result<Vec<SalaryRecord>, ReadError> {
        Ok(self.salary_records.clone())
    }

    fn fixed_expenses(&self) -> Result<Vec<FixedExpense>, ReadError> {
        Ok(self.fixed_expenses.clone())
    }
}

/// A reader whose every query fails.
pub struct FailingLedger;

impl LedgerReader for FailingLedger {
    fn revision(&self) -> u64 {
        0
    }

    fn agreements(&self) -> Result<Vec<DebtAgreement>, ReadError> {
        Err(ReadError::new("ledger unavailable"))
    }

    fn installments_due_between(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<Installment>, ReadError> {
        Err(ReadError::new("ledger unavailable"))
    }

    fn payments_between(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<Payment>, ReadError> {
        Err(ReadError::new("ledger unavailable"))
    }

    fn transactions_between(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<Transaction>, ReadError> {
        Err(ReadError::new("ledger unavailable"))
    }

    fn salary_records(&self) -> Result<Vec<SalaryRecord>, ReadError> {
        Err(ReadError::new("ledger unavailable"))
    }

    fn fixed_expenses(&self) -> Result<Vec<FixedExpense>, ReadError> {
        Err(ReadError::new("ledger unavailable"))
    }
}
