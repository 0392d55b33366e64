//! Personal lending ledger.
//!
//! This module holds the ledger entities and their write-side rules:
//! - Entity types (debtors, agreements, installments, payments, cash flow)
//! - Creation of agreements from a generated installment plan
//! - Payment registration and status derivation
//! - The read seam consumed by the analytics modules

pub mod error;
pub mod payment;
pub mod reader;
pub mod service;
pub mod types;

pub use error::{LedgerError, ReadError};
pub use payment::PaymentService;
pub use reader::LedgerReader;
pub use service::{CreateAgreementInput, CreateTransactionInput, LedgerService, NewAgreement};
pub use types::{
    DebtAgreement, Debtor, FixedExpense, Installment, InstallmentStatus, Payment, SalaryRecord,
    Transaction, TransactionKind, TransactionStatus,
};
