//! Reference ledger store for Lendbook.
//!
//! This crate provides:
//! - `InMemoryLedger`, implementing the core's read seams
//! - Write helpers that route through the core's ledger rules
//! - JSON document persistence

pub mod document;
pub mod error;
pub mod memory;

pub use document::{LEDGER_DOCUMENT_VERSION, LedgerDocument};
pub use error::StoreError;
pub use memory::InMemoryLedger;
