//! Double-entry posting logic.
//!
//! This module implements the rules that turn a caller-supplied set of
//! account/amount pairs into a balanced set of postings:
//! - Posting-date validation against the active financial year
//! - Expansion of journal/voucher/deposit lines into postings
//! - Conservation checking (total debits equal total credits)
//! - Error types for posting validation

pub mod error;
pub mod fiscal;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use fiscal::{financial_year_start, validate_posting_date};
pub use types::{CounterpartLine, EntryType, JournalLine, PostingDraft};
pub use validation::{
    check_conservation, expand_deposit_lines, expand_journal_lines, expand_voucher_lines, totals,
};
