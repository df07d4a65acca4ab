//! Account classification hierarchy.
//!
//! Accounts sit at the leaf of a three-level classification:
//! `MainAccount -> SubAccount -> AccountCategory -> Account`. The main
//! accounts are a fixed set whose order drives statement presentation and
//! whose identity drives the normal-balance convention.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six fixed main accounts, in statement-presentation order.
///
/// Assets and Expenses accumulate a net debit balance; Liabilities, Equity,
/// Revenue, and Other Revenue accumulate a net credit balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainAccountKind {
    /// Asset accounts (cash, receivables, fixed assets).
    Assets,
    /// Liability accounts (payables, loans).
    Liabilities,
    /// Equity accounts (capital, retained earnings).
    Equity,
    /// Expense accounts (operating costs, cost of sales).
    Expenses,
    /// Revenue accounts (operating income).
    Revenue,
    /// Other revenue accounts (non-operating income).
    OtherRevenue,
}

/// Error returned when a stored main-account name is not one of the fixed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown main account: {0}")]
pub struct UnknownMainAccount(pub String);

impl MainAccountKind {
    /// All main accounts in statement-presentation order.
    pub const ALL: [Self; 6] = [
        Self::Assets,
        Self::Liabilities,
        Self::Equity,
        Self::Expenses,
        Self::Revenue,
        Self::OtherRevenue,
    ];

    /// Position of this main account in the fixed presentation order.
    #[must_use]
    pub const fn statement_order(self) -> u8 {
        match self {
            Self::Assets => 0,
            Self::Liabilities => 1,
            Self::Equity => 2,
            Self::Expenses => 3,
            Self::Revenue => 4,
            Self::OtherRevenue => 5,
        }
    }

    /// Returns true for main accounts that accumulate a net debit balance.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Assets | Self::Expenses)
    }

    /// The display name stored in the `main_account` table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::Equity => "Equity",
            Self::Expenses => "Expenses",
            Self::Revenue => "Revenue",
            Self::OtherRevenue => "Other Revenue",
        }
    }
}

impl std::fmt::Display for MainAccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MainAccountKind {
    type Err = UnknownMainAccount;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Assets" => Ok(Self::Assets),
            "Liabilities" => Ok(Self::Liabilities),
            "Equity" => Ok(Self::Equity),
            "Expenses" => Ok(Self::Expenses),
            "Revenue" => Ok(Self::Revenue),
            "Other Revenue" => Ok(Self::OtherRevenue),
            other => Err(UnknownMainAccount(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_statement_order_matches_all() {
        for (position, kind) in MainAccountKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.statement_order()), position);
        }
    }

    #[test]
    fn test_normal_balance_sides() {
        assert!(MainAccountKind::Assets.is_debit_normal());
        assert!(MainAccountKind::Expenses.is_debit_normal());
        assert!(!MainAccountKind::Liabilities.is_debit_normal());
        assert!(!MainAccountKind::Equity.is_debit_normal());
        assert!(!MainAccountKind::Revenue.is_debit_normal());
        assert!(!MainAccountKind::OtherRevenue.is_debit_normal());
    }

    #[test]
    fn test_name_roundtrip() {
        for kind in MainAccountKind::ALL {
            assert_eq!(MainAccountKind::from_str(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = MainAccountKind::from_str("Contingencies").unwrap_err();
        assert_eq!(err, UnknownMainAccount("Contingencies".to_string()));
    }
}
