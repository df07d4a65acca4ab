//! Database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use quill_core::ledger::EntryType;

/// Posting side stored on `account_transaction.type`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "posting_side")]
pub enum PostingSide {
    /// Debit posting (`DR`).
    #[sea_orm(string_value = "DR")]
    Debit,
    /// Credit posting (`CR`).
    #[sea_orm(string_value = "CR")]
    Credit,
}

impl From<EntryType> for PostingSide {
    fn from(entry_type: EntryType) -> Self {
        match entry_type {
            EntryType::Debit => Self::Debit,
            EntryType::Credit => Self::Credit,
        }
    }
}

impl From<PostingSide> for EntryType {
    fn from(side: PostingSide) -> Self {
        match side {
            PostingSide::Debit => Self::Debit,
            PostingSide::Credit => Self::Credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_side_roundtrip() {
        assert_eq!(PostingSide::from(EntryType::Debit), PostingSide::Debit);
        assert_eq!(PostingSide::from(EntryType::Credit), PostingSide::Credit);
        assert_eq!(EntryType::from(PostingSide::Debit), EntryType::Debit);
        assert_eq!(EntryType::from(PostingSide::Credit), EntryType::Credit);
    }
}
