//! Debtor payment history view consumed by the scorer.

use std::collections::HashMap;

use chrono::NaiveDate;
use lendbook_shared::types::{DebtorId, InstallmentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{DebtAgreement, Installment, Payment, ReadError};

/// Read access to a debtor's full lending history.
pub trait DebtorHistoryReader {
    /// Returns the agreements, installments and payments of one debtor.
    ///
    /// An unknown debtor yields an empty history, not an error.
    fn debtor_history(&self, debtor_id: DebtorId) -> Result<DebtorHistory, ReadError>;
}

/// An installment together with the payments made against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentHistory {
    /// The installment.
    pub installment: Installment,
    /// Payments ordered by date.
    pub payments: Vec<Payment>,
}

impl InstallmentHistory {
    /// Date on which the installment became fully paid, if it did.
    ///
    /// Walks the payments in date order. Falls back to the installment's own
    /// `paid_at` (or its due date) when the stored paid amount covers the
    /// installment but the payment records do not.
    #[must_use]
    pub fn settlement_date(&self) -> Option<NaiveDate> {
        let amount = self.installment.amount;
        let mut cumulative = Decimal::ZERO;
        for payment in &self.payments {
            cumulative += payment.amount;
            if cumulative >= amount {
                return Some(payment.date);
            }
        }

        self.installment
            .is_fully_paid()
            .then(|| self.installment.paid_at.unwrap_or(self.installment.due_date))
    }

    /// Sum of the recorded payments.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.payments.iter().map(|payment| payment.amount).sum()
    }
}

/// An agreement with its installment histories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementHistory {
    /// The agreement.
    pub agreement: DebtAgreement,
    /// Installments ordered by number.
    pub installments: Vec<InstallmentHistory>,
}

impl AgreementHistory {
    /// Sum of payments recorded on the agreement.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.installments.iter().map(InstallmentHistory::total_paid).sum()
    }
}

/// A debtor's complete agreement, installment and payment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtorHistory {
    /// Debtor described.
    pub debtor_id: DebtorId,
    /// Agreements in creation order.
    pub agreements: Vec<AgreementHistory>,
}

impl DebtorHistory {
    /// A history with no agreements.
    #[must_use]
    pub const fn empty(debtor_id: DebtorId) -> Self {
        Self {
            debtor_id,
            agreements: Vec::new(),
        }
    }

    /// Groups flat ledger rows into a debtor history.
    ///
    /// Agreements of other debtors are dropped, as are installments and
    /// payments that do not belong to a kept agreement.
    #[must_use]
    pub fn assemble(
        debtor_id: DebtorId,
        agreements: Vec<DebtAgreement>,
        installments: Vec<Installment>,
        payments: Vec<Payment>,
    ) -> Self {
        let mut payments_by_installment: HashMap<InstallmentId, Vec<Payment>> = HashMap::new();
        for payment in payments {
            payments_by_installment
                .entry(payment.installment_id)
                .or_default()
                .push(payment);
        }

        let mut installments_by_agreement: HashMap<_, Vec<InstallmentHistory>> = HashMap::new();
        for installment in installments {
            let mut payments = payments_by_installment
                .remove(&installment.id)
                .unwrap_or_default();
            payments.sort_by_key(|payment| payment.date);
            installments_by_agreement
                .entry(installment.agreement_id)
                .or_default()
                .push(InstallmentHistory {
                    installment,
                    payments,
                });
        }

        let mut agreements: Vec<AgreementHistory> = agreements
            .into_iter()
            .filter(|agreement| agreement.debtor_id == debtor_id)
            .map(|agreement| {
                let mut installments = installments_by_agreement
                    .remove(&agreement.id)
                    .unwrap_or_default();
                installments.sort_by_key(|entry| entry.installment.number);
                AgreementHistory {
                    agreement,
                    installments,
                }
            })
            .collect();
        agreements.sort_by_key(|entry| entry.agreement.created_at);

        Self {
            debtor_id,
            agreements,
        }
    }

    /// Iterates every installment history across agreements.
    pub fn installments(&self) -> impl Iterator<Item = &InstallmentHistory> {
        self.agreements
            .iter()
            .flat_map(|agreement| agreement.installments.iter())
    }
}
