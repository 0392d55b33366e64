//! Ledger entity types.

use chrono::{DateTime, NaiveDate, Utc};
use lendbook_shared::types::{
    AgreementId, CalendarMonth, DebtorId, FixedExpenseId, InstallmentId, PaymentId,
    SalaryRecordId, TransactionId, non_negative,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A person money was lent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debtor {
    /// Debtor ID.
    pub id: DebtorId,
    /// Display name.
    pub name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Archived debtors are hidden but keep their history.
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An installment-based debt agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtAgreement {
    /// Agreement ID.
    pub id: AgreementId,
    /// Debtor owing the money.
    pub debtor_id: DebtorId,
    /// Optional description.
    pub description: Option<String>,
    /// Amount lent.
    pub principal: Decimal,
    /// Monthly interest as a percentage (`2` means 2%), if any.
    pub monthly_interest_rate: Option<Decimal>,
    /// Number of installments.
    pub installment_count: u32,
    /// Due date of the first installment.
    pub first_due_date: NaiveDate,
    /// Principal plus scheduled interest.
    pub total_amount: Decimal,
    /// Whether every installment has been paid.
    pub is_settled: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Payment state of an installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    /// Not yet due, nothing paid.
    Pending,
    /// Not yet due, partially paid.
    Partial,
    /// Fully paid.
    Paid,
    /// Past due with a remaining balance.
    Overdue,
}

impl InstallmentStatus {
    /// Derives the status of an installment as of `today`.
    #[must_use]
    pub fn derive(amount: Decimal, paid: Decimal, due_date: NaiveDate, today: NaiveDate) -> Self {
        if paid >= amount {
            Self::Paid
        } else if due_date < today {
            Self::Overdue
        } else if paid > Decimal::ZERO {
            Self::Partial
        } else {
            Self::Pending
        }
    }
}

/// One scheduled payment obligation of an agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Installment ID.
    pub id: InstallmentId,
    /// Owning agreement.
    pub agreement_id: AgreementId,
    /// Installment number within the agreement (1-based).
    pub number: u32,
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount owed.
    pub amount: Decimal,
    /// Amount paid so far.
    pub paid_amount: Decimal,
    /// Status as of the last update.
    pub status: InstallmentStatus,
    /// Date the installment became fully paid.
    pub paid_at: Option<NaiveDate>,
}

impl Installment {
    /// Amount still owed (never negative).
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        non_negative(self.amount - self.paid_amount)
    }

    /// Returns true once the paid amount covers the installment.
    #[must_use]
    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount >= self.amount
    }

    /// Returns true if the installment is past due on `today` with a balance left.
    #[must_use]
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.due_date < today && !self.is_fully_paid()
    }
}

/// Money received against an installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID.
    pub id: PaymentId,
    /// Installment the payment settles.
    pub installment_id: InstallmentId,
    /// Date received.
    pub date: NaiveDate,
    /// Amount received.
    pub amount: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Direction of a variable transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

/// Settlement state of a variable transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Money actually moved.
    Paid,
    /// Scheduled or promised, not yet settled.
    Pending,
}

/// A one-off (variable) income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Description.
    pub description: String,
    /// Optional category label.
    pub category: Option<String>,
    /// Amount (always positive; direction comes from `kind`).
    pub amount: Decimal,
    /// Transaction date.
    pub date: NaiveDate,
    /// Paid or pending.
    pub status: TransactionStatus,
}

impl Transaction {
    /// Returns true if money actually moved.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == TransactionStatus::Paid
    }
}

/// A recurring contractual expense (rent, subscriptions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpense {
    /// Fixed expense ID.
    pub id: FixedExpenseId,
    /// Name.
    pub name: String,
    /// Monthly amount.
    pub amount: Decimal,
    /// Day of month the expense is due.
    pub due_day: u32,
    /// First month the expense applies to.
    pub start_month: CalendarMonth,
    /// Last month the expense applies to, if it ends.
    pub end_month: Option<CalendarMonth>,
    /// Inactive expenses apply to no month.
    pub is_active: bool,
}

impl FixedExpense {
    /// Returns true if the expense is charged in `month`.
    #[must_use]
    pub fn applies_to(&self, month: CalendarMonth) -> bool {
        self.is_active
            && self.start_month <= month
            && self.end_month.is_none_or(|end| month <= end)
    }
}

/// Salary in force from a given month until superseded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Salary record ID.
    pub id: SalaryRecordId,
    /// Monthly amount.
    pub amount: Decimal,
    /// First month this amount applies to.
    pub effective_from: CalendarMonth,
}

impl SalaryRecord {
    /// Salary in force for `month`: the latest record effective on or before it.
    #[must_use]
    pub fn in_force(records: &[Self], month: CalendarMonth) -> Decimal {
        records
            .iter()
            .filter(|record| record.effective_from <= month)
            .max_by_key(|record| record.effective_from)
            .map_or(Decimal::ZERO, |record| record.amount)
    }
}
