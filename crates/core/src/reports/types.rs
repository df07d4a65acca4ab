//! Report row types.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use quill_shared::types::{AccountId, TransactionId};

use crate::chart::MainAccountKind;
use crate::ledger::EntryType;

/// An account with its full classification path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    /// The account identity.
    pub account_id: AccountId,
    /// External account code.
    pub code: i32,
    /// Display name.
    pub name: String,
    /// The fixed main account this account rolls up to.
    pub main: MainAccountKind,
    /// Sub-account code, used for ordering within a main account.
    pub sub_account_code: i32,
    /// Sub-account display name.
    pub sub_account: String,
    /// Category code, used for ordering within a sub account.
    pub category_code: i32,
    /// Category display name.
    pub category: String,
}

/// Posting activity folded per account: total debits and credits over some
/// date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountActivity {
    /// The account and its classification.
    pub profile: AccountProfile,
    /// Sum of DEBIT postings.
    pub debits: Decimal,
    /// Sum of CREDIT postings.
    pub credits: Decimal,
}

/// One trial-balance row: the net balance split into presentation columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    /// The account identity.
    pub account_id: AccountId,
    /// External account code.
    pub code: i32,
    /// Display name.
    pub name: String,
    /// Main-account name.
    pub main_account: MainAccountKind,
    /// Sub-account name.
    pub sub_account: String,
    /// Category name.
    pub category: String,
    /// Net debit, shown when the account nets to the debit side.
    pub debit: Decimal,
    /// Net credit, shown when the account nets to the credit side.
    pub credit: Decimal,
}

/// A non-zero account balance for statement detail views.
///
/// `amount` is the signed net debit (debits minus credits); credit-heavy
/// accounts carry a negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    /// The account identity.
    pub account_id: AccountId,
    /// External account code.
    pub code: i32,
    /// Display name.
    pub name: String,
    /// Main-account name.
    pub main_account: MainAccountKind,
    /// Sub-account name.
    pub sub_account: String,
    /// Category name.
    pub category: String,
    /// Signed net debit balance.
    pub amount: Decimal,
}

/// One balance-sheet roll-up line: balances summed per classification group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheetLine {
    /// Main-account name.
    pub main_account: MainAccountKind,
    /// Sub-account name.
    pub sub_account: String,
    /// Category name.
    pub category: String,
    /// Signed net debit balance of the group.
    pub amount: Decimal,
}

/// One posting in the audit log, with its transaction context attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRow {
    /// When the transaction was recorded (server time).
    pub recorded_at: NaiveDateTime,
    /// Name of the issuing user.
    pub issuer: String,
    /// The owning transaction.
    pub transaction_id: TransactionId,
    /// Posted account name.
    pub account: String,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// The transaction's posting date.
    pub posting_date: NaiveDate,
    /// Posting amount.
    pub amount: Decimal,
    /// Transaction remark, if any.
    pub remark: Option<String>,
}
