//! Payment registration against installments.

use chrono::NaiveDate;
use lendbook_shared::types::PaymentId;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::LedgerError;
use super::types::{Installment, InstallmentStatus, Payment};

/// Stateless payment rules.
pub struct PaymentService;

impl PaymentService {
    /// Registers a payment against an installment.
    ///
    /// Returns the new payment and the updated installment. Partial payments
    /// are allowed; paying more than the remaining balance is not.
    ///
    /// # Errors
    ///
    /// Returns `NonPositivePayment`, `AlreadyPaid` or `Overpayment`.
    pub fn register(
        installment: &Installment,
        amount: Decimal,
        date: NaiveDate,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<(Payment, Installment), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositivePayment(amount));
        }
        if installment.is_fully_paid() {
            return Err(LedgerError::AlreadyPaid(installment.id));
        }

        let remaining = installment.remaining();
        if amount > remaining {
            return Err(LedgerError::Overpayment {
                installment_id: installment.id,
                remaining,
                attempted: amount,
            });
        }

        let payment = Payment {
            id: PaymentId::new(),
            installment_id: installment.id,
            date,
            amount,
            notes,
        };

        let mut updated = installment.clone();
        updated.paid_amount += amount;
        updated.status = InstallmentStatus::derive(
            updated.amount,
            updated.paid_amount,
            updated.due_date,
            today,
        );
        if updated.status == InstallmentStatus::Paid {
            updated.paid_at = Some(date);
        }

        info!(
            installment_id = %updated.id,
            amount = %amount,
            status = ?updated.status,
            "registered payment"
        );

        Ok((payment, updated))
    }

    /// Re-derives the status of every installment as of `today`.
    ///
    /// Returns the number of installments whose status changed.
    pub fn refresh_status(installments: &mut [Installment], today: NaiveDate) -> usize {
        let mut changed = 0;
        for installment in installments.iter_mut() {
            let status = InstallmentStatus::derive(
                installment.amount,
                installment.paid_amount,
                installment.due_date,
                today,
            );
            if status != installment.status {
                installment.status = status;
                changed += 1;
            }
        }

        debug!(changed, %today, "refreshed installment status");
        changed
    }
}
