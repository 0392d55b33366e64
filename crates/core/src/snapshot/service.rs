//! Snapshot service folding ledger rows into monthly aggregates.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use lendbook_shared::types::CalendarMonth;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{MonthLedger, MonthlySnapshot, MonthlyTotals};
use crate::ledger::{
    Installment, LedgerReader, ReadError, SalaryRecord, Transaction, TransactionKind,
};

/// Stateless monthly snapshot computation.
pub struct SnapshotService;

impl SnapshotService {
    /// Folds ledger rows into the snapshot of `month` as seen on `as_of`.
    ///
    /// Only paid transactions count. Installments are overdue when due before
    /// the earlier of `as_of` and the first day of the following month.
    #[must_use]
    pub fn aggregate(
        month: CalendarMonth,
        as_of: NaiveDate,
        ledger: &MonthLedger,
    ) -> MonthlySnapshot {
        let salary = SalaryRecord::in_force(&ledger.salary_records, month);

        let payments_received: Decimal = ledger
            .payments
            .iter()
            .filter(|payment| month.contains(payment.date))
            .map(|payment| payment.amount)
            .sum();

        let variable_income = paid_total(&ledger.transactions, month, TransactionKind::Income);
        let variable_expenses = paid_total(&ledger.transactions, month, TransactionKind::Expense);

        let fixed_expenses: Decimal = ledger
            .fixed_expenses
            .iter()
            .filter(|expense| expense.applies_to(month))
            .map(|expense| expense.amount)
            .sum();

        let month_end = month.last_day();
        let overdue_cutoff = as_of.min(month.next().first_day());
        let overdue_amount: Decimal = ledger
            .installments
            .iter()
            .filter(|installment| installment.due_date <= month_end)
            .filter(|installment| installment.due_date < overdue_cutoff)
            .map(Installment::remaining)
            .sum();

        let active: HashSet<_> = ledger
            .installments
            .iter()
            .filter(|installment| {
                month.contains(installment.due_date)
                    || (installment.due_date < month.first_day() && !installment.is_fully_paid())
            })
            .map(|installment| installment.agreement_id)
            .collect();

        let debtor_of: HashMap<_, _> = ledger
            .agreements
            .iter()
            .map(|agreement| (agreement.id, agreement.debtor_id))
            .collect();
        let debtors: HashSet<_> = active
            .iter()
            .filter_map(|agreement_id| debtor_of.get(agreement_id))
            .collect();

        MonthlySnapshot::from_totals(
            month,
            MonthlyTotals {
                salary,
                payments_received,
                variable_income,
                fixed_expenses,
                variable_expenses,
                overdue_amount,
                active_debtors: count(debtors.len()),
                active_agreements: count(active.len()),
            },
        )
    }

    /// Reads the month's ledger rows and computes its snapshot.
    ///
    /// # Errors
    ///
    /// Returns the reader's `ReadError` unchanged.
    pub fn compute_month<R>(
        reader: &R,
        month: CalendarMonth,
        as_of: NaiveDate,
    ) -> Result<MonthlySnapshot, ReadError>
    where
        R: LedgerReader + ?Sized,
    {
        let ledger = Self::fetch(reader, month, month)?;
        Ok(Self::aggregate(month, as_of, &ledger))
    }

    /// Computes one snapshot per month from `first` to `last` inclusive.
    ///
    /// Reads the ledger once for the whole range. An inverted range yields
    /// no snapshots.
    ///
    /// # Errors
    ///
    /// Returns the reader's `ReadError` unchanged.
    pub fn compute_range<R>(
        reader: &R,
        first: CalendarMonth,
        last: CalendarMonth,
        as_of: NaiveDate,
    ) -> Result<Vec<MonthlySnapshot>, ReadError>
    where
        R: LedgerReader + ?Sized,
    {
        if first > last {
            return Ok(Vec::new());
        }

        let ledger = Self::fetch(reader, first, last)?;
        let mut snapshots = Vec::new();
        let mut month = first;
        loop {
            snapshots.push(Self::aggregate(month, as_of, &ledger));
            if month >= last {
                break;
            }
            month = month.next();
        }

        debug!(
            first = %first,
            last = %last,
            months = snapshots.len(),
            "computed monthly snapshots"
        );

        Ok(snapshots)
    }

    fn fetch<R>(
        reader: &R,
        first: CalendarMonth,
        last: CalendarMonth,
    ) -> Result<MonthLedger, ReadError>
    where
        R: LedgerReader + ?Sized,
    {
        let start = first.first_day();
        let end = last.last_day();

        Ok(MonthLedger {
            salary_records: reader.salary_records()?,
            fixed_expenses: reader.fixed_expenses()?,
            payments: reader.payments_between(start, end)?,
            transactions: reader.transactions_between(start, end)?,
            agreements: reader.agreements()?,
            installments: reader.installments_due_between(NaiveDate::MIN, end)?,
        })
    }
}

fn paid_total(transactions: &[Transaction], month: CalendarMonth, kind: TransactionKind) -> Decimal {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.kind == kind && transaction.is_paid() && month.contains(transaction.date)
        })
        .map(|transaction| transaction.amount)
        .sum()
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
