//! JSON ledger document persistence.
//!
//! The whole ledger lives in one JSON document. A missing file is an empty
//! ledger; a corrupt or foreign-version file is an error, never silently
//! replaced.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use lendbook_core::ledger::{
    DebtAgreement, Debtor, FixedExpense, Installment, Payment, SalaryRecord, Transaction,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;

/// Format version written by this build.
pub const LEDGER_DOCUMENT_VERSION: u32 = 1;

/// Every ledger entity, as saved to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDocument {
    /// Format version.
    pub version: u32,
    /// Debtors.
    #[serde(default)]
    pub debtors: Vec<Debtor>,
    /// Debt agreements.
    #[serde(default)]
    pub agreements: Vec<DebtAgreement>,
    /// Installments of every agreement.
    #[serde(default)]
    pub installments: Vec<Installment>,
    /// Payments against installments.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// Variable income and expenses.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Recurring expense templates.
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,
    /// Salary history.
    #[serde(default)]
    pub salary_records: Vec<SalaryRecord>,
}

impl Default for LedgerDocument {
    fn default() -> Self {
        Self {
            version: LEDGER_DOCUMENT_VERSION,
            debtors: Vec::new(),
            agreements: Vec::new(),
            installments: Vec::new(),
            payments: Vec::new(),
            transactions: Vec::new(),
            fixed_expenses: Vec::new(),
            salary_records: Vec::new(),
        }
    }
}

impl LedgerDocument {
    /// Reads a document from `path`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Json` if it does not parse
    /// and `UnsupportedVersion` for another format version.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        let document: Self = serde_json::from_reader(BufReader::new(file))?;

        if document.version != LEDGER_DOCUMENT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: document.version,
                expected: LEDGER_DOCUMENT_VERSION,
            });
        }

        info!(
            path = %path.display(),
            debtors = document.debtors.len(),
            agreements = document.agreements.len(),
            installments = document.installments.len(),
            "loaded ledger document"
        );

        Ok(document)
    }

    /// Reads a document, or starts an empty one when `path` does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`] for an existing file.
    pub fn load_or_default(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            info!(
                path = %path.display(),
                "No ledger document found, starting empty"
            );
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Writes the document to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Json` if writing fails.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;

        debug!(path = %path.display(), "saved ledger document");

        Ok(())
    }
}
