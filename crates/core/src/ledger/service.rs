//! Ledger service for creating entities.
//!
//! Every constructor validates its input and returns plain values; the
//! caller decides how and when to persist them.

use chrono::{DateTime, NaiveDate, Utc};
use lendbook_shared::types::{
    AgreementId, CalendarMonth, DebtorId, FixedExpenseId, InstallmentId, SalaryRecordId,
    TransactionId, round_money,
};
use rust_decimal::Decimal;
use tracing::info;

use super::error::LedgerError;
use super::types::{
    DebtAgreement, Debtor, FixedExpense, Installment, InstallmentStatus, SalaryRecord,
    Transaction, TransactionKind, TransactionStatus,
};
use crate::schedule::{AmortizationScheduler, InstallmentPlanEntry};

/// Input for creating a debt agreement.
#[derive(Debug, Clone)]
pub struct CreateAgreementInput {
    /// Debtor owing the money.
    pub debtor_id: DebtorId,
    /// Optional description.
    pub description: Option<String>,
    /// Amount lent.
    pub principal: Decimal,
    /// Monthly interest percentage, if any.
    pub monthly_interest_rate: Option<Decimal>,
    /// Number of installments.
    pub installment_count: u32,
    /// Due date of the first installment.
    pub first_due_date: NaiveDate,
}

/// A freshly created agreement with its installments.
#[derive(Debug, Clone)]
pub struct NewAgreement {
    /// The agreement.
    pub agreement: DebtAgreement,
    /// One installment per plan entry.
    pub installments: Vec<Installment>,
}

/// Input for recording a variable transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Description.
    pub description: String,
    /// Optional category.
    pub category: Option<String>,
    /// Amount (positive).
    pub amount: Decimal,
    /// Transaction date.
    pub date: NaiveDate,
    /// Paid or pending.
    pub status: TransactionStatus,
}

/// Stateless constructors for ledger entities.
pub struct LedgerService;

impl LedgerService {
    /// Creates a debtor.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::EmptyDebtorName` if the name is blank.
    pub fn create_debtor(
        name: &str,
        phone: Option<String>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Debtor, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyDebtorName);
        }

        Ok(Debtor {
            id: DebtorId::new(),
            name: name.to_string(),
            phone,
            notes,
            is_archived: false,
            created_at: now,
        })
    }

    /// Creates an agreement and its installments from a generated plan.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Schedule` if the plan cannot be generated.
    pub fn create_agreement(
        input: CreateAgreementInput,
        now: DateTime<Utc>,
    ) -> Result<NewAgreement, LedgerError> {
        let plan = AmortizationScheduler::generate_schedule(
            input.principal,
            input.installment_count,
            input.monthly_interest_rate,
            input.first_due_date,
        )?;

        let agreement = DebtAgreement {
            id: AgreementId::new(),
            debtor_id: input.debtor_id,
            description: input.description,
            principal: round_money(input.principal),
            monthly_interest_rate: input.monthly_interest_rate,
            installment_count: input.installment_count,
            first_due_date: input.first_due_date,
            total_amount: InstallmentPlanEntry::total_amount(&plan),
            is_settled: false,
            created_at: now,
        };

        let installments = plan
            .into_iter()
            .map(|entry| Installment {
                id: InstallmentId::new(),
                agreement_id: agreement.id,
                number: entry.number,
                due_date: entry.due_date,
                amount: entry.amount,
                paid_amount: Decimal::ZERO,
                status: InstallmentStatus::Pending,
                paid_at: None,
            })
            .collect();

        info!(
            agreement_id = %agreement.id,
            debtor_id = %agreement.debtor_id,
            principal = %agreement.principal,
            total = %agreement.total_amount,
            installments = agreement.installment_count,
            "created debt agreement"
        );

        Ok(NewAgreement {
            agreement,
            installments,
        })
    }

    /// Creates a variable income or expense.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NonPositiveAmount` for a zero or negative amount.
    pub fn create_transaction(input: CreateTransactionInput) -> Result<Transaction, LedgerError> {
        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(input.amount));
        }

        Ok(Transaction {
            id: TransactionId::new(),
            kind: input.kind,
            description: input.description,
            category: input.category,
            amount: input.amount,
            date: input.date,
            status: input.status,
        })
    }

    /// Creates an active fixed expense starting in `start_month`.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` or `InvalidDueDay` for malformed input.
    pub fn create_fixed_expense(
        name: &str,
        amount: Decimal,
        due_day: u32,
        start_month: CalendarMonth,
    ) -> Result<FixedExpense, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        if !(1..=31).contains(&due_day) {
            return Err(LedgerError::InvalidDueDay(due_day));
        }

        Ok(FixedExpense {
            id: FixedExpenseId::new(),
            name: name.trim().to_string(),
            amount,
            due_day,
            start_month,
            end_month: None,
            is_active: true,
        })
    }

    /// Creates a salary record effective from `effective_from`.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` for a zero or negative salary.
    pub fn create_salary_record(
        amount: Decimal,
        effective_from: CalendarMonth,
    ) -> Result<SalaryRecord, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        Ok(SalaryRecord {
            id: SalaryRecordId::new(),
            amount,
            effective_from,
        })
    }

    /// Returns true once every installment of an agreement is fully paid.
    #[must_use]
    pub fn is_settled(installments: &[Installment]) -> bool {
        !installments.is_empty() && installments.iter().all(Installment::is_fully_paid)
    }
}
