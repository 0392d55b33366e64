//! Typed IDs for ledger entities.
//!
//! Using typed IDs prevents accidentally passing a `PaymentId` where an
//! `InstallmentId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(DebtorId, "Unique identifier for a debtor.");
typed_id!(AgreementId, "Unique identifier for a debt agreement.");
typed_id!(InstallmentId, "Unique identifier for an installment.");
typed_id!(PaymentId, "Unique identifier for a payment.");
typed_id!(
    TransactionId,
    "Unique identifier for a variable income or expense transaction."
);
typed_id!(FixedExpenseId, "Unique identifier for a fixed expense.");
typed_id!(SalaryRecordId, "Unique identifier for a salary record.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(DebtorId::new(), DebtorId::new());
    }

    #[test]
    fn test_id_roundtrips_through_string() {
        let id = AgreementId::new();
        let parsed = AgreementId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_rejects_garbage() {
        assert!(PaymentId::from_str("not-a-uuid").is_err());
    }
}
