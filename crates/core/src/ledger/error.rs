//! Posting validation errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while validating a posting request.
///
/// Every variant is detected before any row is written; a request that
/// fails here leaves no state behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The posting date could not be parsed as a calendar date.
    #[error("Invalid posting date: {0}")]
    InvalidDate(String),

    /// The posting date precedes the active financial year.
    #[error("Posting date {posting_date} does not fall within the financial year starting {year_start}")]
    OutOfFinancialYear {
        /// The rejected posting date.
        posting_date: NaiveDate,
        /// April 1 of the active financial year.
        year_start: NaiveDate,
    },

    /// The request expands to no postings at all.
    #[error("Entry list produced no postings")]
    EmptyEntries,

    /// An entry amount was negative.
    #[error("Entry amount cannot be negative")]
    NegativeAmount,

    /// Total debits and credits do not match.
    #[error("Entries are unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },
}

impl LedgerError {
    /// Returns the error code for log output and callers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::OutOfFinancialYear { .. } => "OUT_OF_FINANCIAL_YEAR",
            Self::EmptyEntries => "EMPTY_ENTRIES",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRIES",
        }
    }
}
