//! Posting domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quill_shared::types::AccountId;

/// Posting side: either Debit or Credit.
///
/// Stored with the wire codes `"DR"` and `"CR"`. An amount is never signed;
/// the side carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit posting.
    Debit,
    /// Credit posting.
    Credit,
}

impl EntryType {
    /// The two-letter storage code for this side.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Debit => "DR",
            Self::Credit => "CR",
        }
    }

    /// Parses a storage code back into a side.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DR" => Some(Self::Debit),
            "CR" => Some(Self::Credit),
            _ => None,
        }
    }
}

/// One line of a journal-entry request.
///
/// A line may carry a debit amount, a credit amount, or both; each present
/// side becomes its own posting. This is the deserialised form of the
/// caller's entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// The account to post against.
    pub account_id: AccountId,
    /// Debit amount, if this line debits the account.
    #[serde(default)]
    pub debit: Option<Decimal>,
    /// Credit amount, if this line credits the account.
    #[serde(default)]
    pub credit: Option<Decimal>,
}

/// One counterpart line of a payment voucher or deposit.
///
/// Vouchers debit these lines against one credited account; deposits credit
/// them against one debited account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartLine {
    /// The account to post against.
    pub account_id: AccountId,
    /// The posting amount.
    pub amount: Decimal,
}

/// A validated posting ready for insertion, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingDraft {
    /// The account to post against.
    pub account_id: AccountId,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// The posting amount (strictly positive).
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_codes() {
        assert_eq!(EntryType::Debit.code(), "DR");
        assert_eq!(EntryType::Credit.code(), "CR");
    }

    #[test]
    fn test_entry_type_from_code() {
        assert_eq!(EntryType::from_code("DR"), Some(EntryType::Debit));
        assert_eq!(EntryType::from_code("CR"), Some(EntryType::Credit));
        assert_eq!(EntryType::from_code("XX"), None);
    }

    #[test]
    fn test_journal_line_deserialises_with_missing_sides() {
        let line: JournalLine =
            serde_json::from_str(r#"{"account_id":"018f7f1e-0000-7000-8000-000000000001","debit":"100.00"}"#)
                .unwrap();
        assert!(line.debit.is_some());
        assert!(line.credit.is_none());
    }
}
