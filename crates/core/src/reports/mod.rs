//! Balance derivation and report presentation policy.
//!
//! The storage layer fetches accounts and posting sums; this module applies
//! the fixed classification ordering, splits net balances into debit/credit
//! columns, rolls balances up for the balance sheet, and defines the
//! deterministic audit-export ordering.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::{
    balance_sheet_summary, net_balance, pnl_accounts, reporting_balances, sort_audit_rows,
    trial_balance_rows,
};
pub use types::{
    AccountActivity, AccountBalance, AccountProfile, AuditRow, BalanceSheetLine, TrialBalanceRow,
};
