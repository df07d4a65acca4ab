//! Report aggregator: read-only derivation of views from posting history.
//!
//! Each operation fetches rows, folds posting sums per account, and hands
//! presentation (classification ordering, column split, roll-ups, audit
//! ordering) to `quill_core::reports`. All operations are idempotent and
//! have no side effects.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

use quill_core::chart::{MainAccountKind, UnknownMainAccount};
use quill_core::ledger::EntryType;
use quill_core::reports::{
    self, AccountActivity, AccountBalance, AccountProfile, AuditRow, BalanceSheetLine,
    TrialBalanceRow,
};
use quill_shared::error::AppError;
use quill_shared::types::{AccountId, TransactionId, VoucherId};

use crate::entities::{
    account, account_category, account_transaction, main_account, payment_voucher,
    sea_orm_active_enums::PostingSide, sub_account, transaction, user,
};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Payment voucher not found.
    #[error("Payment voucher not found: {0}")]
    VoucherNotFound(Uuid),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A stored main-account name is not one of the fixed set.
    #[error(transparent)]
    Classification(#[from] UnknownMainAccount),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::AccountNotFound(_)
            | ReportError::TransactionNotFound(_)
            | ReportError::VoucherNotFound(_) => Self::NotFound(err.to_string()),
            ReportError::InvalidDateRange { .. } => Self::Validation(err.to_string()),
            ReportError::Classification(_) => Self::Internal(err.to_string()),
            ReportError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// One posting in a single account's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    /// Account display name.
    pub account_name: String,
    /// The owning transaction.
    pub transaction_id: TransactionId,
    /// The transaction's posting date.
    pub posting_date: NaiveDate,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Posting amount.
    pub amount: Decimal,
    /// Transaction remark, if any.
    pub remark: Option<String>,
}

/// One posting within a transaction breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionLine {
    /// The owning transaction.
    pub transaction_id: TransactionId,
    /// The posted account.
    pub account_id: AccountId,
    /// External account code.
    pub account_code: i32,
    /// Account display name.
    pub account_name: String,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Posting amount.
    pub amount: Decimal,
}

/// One entry in the payment-voucher listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherSummary {
    /// The voucher identity.
    pub voucher_id: VoucherId,
    /// When the transaction was recorded.
    pub recorded_at: NaiveDateTime,
    /// The transaction's posting date.
    pub posting_date: NaiveDate,
    /// Name of the credited (paying) account.
    pub from_account: String,
    /// Name of the issuing user.
    pub issuer: String,
}

/// One debited line of a payment voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherLine {
    /// External account code.
    pub account_code: i32,
    /// Account display name.
    pub account_name: String,
    /// Debited amount.
    pub amount: Decimal,
    /// The transaction's posting date.
    pub posting_date: NaiveDate,
}

/// A payment voucher header joined with its debited lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherDetail {
    /// Check due date.
    pub due_date: Option<NaiveDate>,
    /// Check number.
    pub check_number: Option<String>,
    /// Payee name.
    pub payee: Option<String>,
    /// Transaction remark, if any.
    pub remark: Option<String>,
    /// Name of the credited (paying) account.
    pub from_account: Option<String>,
    /// When the transaction was recorded.
    pub recorded_at: NaiveDateTime,
    /// The debited lines.
    pub lines: Vec<VoucherLine>,
}

/// Report repository over the posting history.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Statement views
    // ========================================================================

    /// Trial balance as of a date: every account with its net balance split
    /// into debit/credit columns, in the fixed classification order.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or the classification is corrupt.
    pub async fn trial_balance(
        &self,
        as_of: NaiveDate,
    ) -> Result<Vec<TrialBalanceRow>, ReportError> {
        let activities = self.account_activities(None, Some(as_of)).await?;
        Ok(reports::trial_balance_rows(activities))
    }

    /// Non-zero account balances as of a date, for statement detail views.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or the classification is corrupt.
    pub async fn reporting_balances(
        &self,
        as_of: NaiveDate,
    ) -> Result<Vec<AccountBalance>, ReportError> {
        let activities = self.account_activities(None, Some(as_of)).await?;
        Ok(reports::reporting_balances(activities))
    }

    /// Balance-sheet roll-up: balances summed per (main, sub, category).
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or the classification is corrupt.
    pub async fn balance_sheet_summary(
        &self,
        as_of: NaiveDate,
    ) -> Result<Vec<BalanceSheetLine>, ReportError> {
        let balances = self.reporting_balances(as_of).await?;
        Ok(reports::balance_sheet_summary(&balances))
    }

    /// Profit-and-loss account balances over an inclusive date range,
    /// restricted to Expenses, Revenue, and Other Revenue.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` when `from > to`, otherwise
    /// the usual query failures.
    pub async fn pnl_accounts(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AccountBalance>, ReportError> {
        if from > to {
            return Err(ReportError::InvalidDateRange {
                start: from,
                end: to,
            });
        }
        let activities = self.account_activities(Some(from), Some(to)).await?;
        Ok(reports::pnl_accounts(activities))
    }

    // ========================================================================
    // Drill-down views
    // ========================================================================

    /// The chronological posting history of one account, with the owning
    /// transaction's posting date and remark attached.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::AccountNotFound` for an unknown account.
    pub async fn account_ledger(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<LedgerRow>, ReportError> {
        let account = account::Entity::find_by_id(account_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ReportError::AccountNotFound(account_id.into_inner()))?;

        let postings = account_transaction::Entity::find()
            .filter(account_transaction::Column::AccountId.eq(account_id.into_inner()))
            .order_by_asc(account_transaction::Column::Id)
            .all(&self.db)
            .await?;

        let headers = self
            .transaction_headers(postings.iter().map(|p| p.transaction_id))
            .await?;

        let mut rows: Vec<LedgerRow> = postings
            .into_iter()
            .filter_map(|posting| {
                let header = headers.get(&posting.transaction_id)?;
                Some(LedgerRow {
                    account_name: account.name.clone(),
                    transaction_id: TransactionId::from_uuid(posting.transaction_id),
                    posting_date: header.posting_date,
                    entry_type: posting.side.into(),
                    amount: posting.amount,
                    remark: header.remark.clone(),
                })
            })
            .collect();

        // Chronological by accounting period, insertion order within a day.
        rows.sort_by(|a, b| a.posting_date.cmp(&b.posting_date));
        Ok(rows)
    }

    /// The full posting breakdown of one transaction.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::TransactionNotFound` for an unknown
    /// transaction.
    pub async fn transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Vec<TransactionLine>, ReportError> {
        transaction::Entity::find_by_id(transaction_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ReportError::TransactionNotFound(transaction_id.into_inner()))?;

        let postings = account_transaction::Entity::find()
            .filter(account_transaction::Column::TransactionId.eq(transaction_id.into_inner()))
            .order_by_asc(account_transaction::Column::Id)
            .all(&self.db)
            .await?;

        let accounts = self
            .account_names(postings.iter().map(|p| p.account_id))
            .await?;

        Ok(postings
            .into_iter()
            .filter_map(|posting| {
                let (code, name) = accounts.get(&posting.account_id)?;
                Some(TransactionLine {
                    transaction_id,
                    account_id: AccountId::from_uuid(posting.account_id),
                    account_code: *code,
                    account_name: name.clone(),
                    entry_type: posting.side.into(),
                    amount: posting.amount,
                })
            })
            .collect())
    }

    /// The audit log: every posting across all transactions, each filter
    /// independently optional, in the deterministic export order.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn audit_log(
        &self,
        recorded_on: Option<NaiveDate>,
        posted_on: Option<NaiveDate>,
    ) -> Result<Vec<AuditRow>, ReportError> {
        let mut query = transaction::Entity::find();

        if let Some(date) = recorded_on {
            let (start, end) = day_bounds(date);
            query = query
                .filter(transaction::Column::RecordedAt.gte(start))
                .filter(transaction::Column::RecordedAt.lt(end));
        }
        if let Some(date) = posted_on {
            query = query.filter(transaction::Column::PostingDate.eq(date));
        }

        let headers = query.all(&self.db).await?;
        if headers.is_empty() {
            return Ok(vec![]);
        }

        let users: HashMap<Uuid, String> = user::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let header_ids: Vec<Uuid> = headers.iter().map(|t| t.id).collect();
        let postings = account_transaction::Entity::find()
            .filter(account_transaction::Column::TransactionId.is_in(header_ids))
            .all(&self.db)
            .await?;

        let accounts = self
            .account_names(postings.iter().map(|p| p.account_id))
            .await?;
        let headers: HashMap<Uuid, transaction::Model> =
            headers.into_iter().map(|t| (t.id, t)).collect();

        let mut rows: Vec<AuditRow> = postings
            .into_iter()
            .filter_map(|posting| {
                let header = headers.get(&posting.transaction_id)?;
                let (_, account_name) = accounts.get(&posting.account_id)?;
                Some(AuditRow {
                    recorded_at: header.recorded_at,
                    issuer: users.get(&header.user_id).cloned().unwrap_or_default(),
                    transaction_id: TransactionId::from_uuid(header.id),
                    account: account_name.clone(),
                    entry_type: posting.side.into(),
                    posting_date: header.posting_date,
                    amount: posting.amount,
                    remark: header.remark.clone(),
                })
            })
            .collect();

        reports::sort_audit_rows(&mut rows);
        Ok(rows)
    }

    // ========================================================================
    // Payment vouchers
    // ========================================================================

    /// Lists all payment vouchers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn payment_vouchers(&self) -> Result<Vec<VoucherSummary>, ReportError> {
        let vouchers = payment_voucher::Entity::find().all(&self.db).await?;
        if vouchers.is_empty() {
            return Ok(vec![]);
        }

        let headers = self
            .transaction_headers(vouchers.iter().map(|v| v.transaction_id))
            .await?;
        let users: HashMap<Uuid, String> = user::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let mut summaries = Vec::with_capacity(vouchers.len());
        for voucher in vouchers {
            let Some(header) = headers.get(&voucher.transaction_id) else {
                continue;
            };
            let from_account = self
                .credited_account_name(voucher.transaction_id)
                .await?
                .unwrap_or_default();

            summaries.push(VoucherSummary {
                voucher_id: VoucherId::from_uuid(voucher.id),
                recorded_at: header.recorded_at,
                posting_date: header.posting_date,
                from_account,
                issuer: users.get(&header.user_id).cloned().unwrap_or_default(),
            });
        }

        summaries.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.voucher_id.into_inner().cmp(&a.voucher_id.into_inner()))
        });
        Ok(summaries)
    }

    /// One voucher's header joined with its debited lines.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::VoucherNotFound` for an unknown voucher.
    pub async fn payment_voucher_detail(
        &self,
        voucher_id: VoucherId,
    ) -> Result<VoucherDetail, ReportError> {
        let voucher = payment_voucher::Entity::find_by_id(voucher_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ReportError::VoucherNotFound(voucher_id.into_inner()))?;

        let header = transaction::Entity::find_by_id(voucher.transaction_id)
            .one(&self.db)
            .await?
            .ok_or(ReportError::TransactionNotFound(voucher.transaction_id))?;

        let from_account = self.credited_account_name(voucher.transaction_id).await?;

        let debits = account_transaction::Entity::find()
            .filter(account_transaction::Column::TransactionId.eq(voucher.transaction_id))
            .filter(account_transaction::Column::Side.eq(PostingSide::Debit))
            .order_by_asc(account_transaction::Column::Id)
            .all(&self.db)
            .await?;

        let accounts = self
            .account_names(debits.iter().map(|p| p.account_id))
            .await?;

        let lines = debits
            .into_iter()
            .filter_map(|posting| {
                let (code, name) = accounts.get(&posting.account_id)?;
                Some(VoucherLine {
                    account_code: *code,
                    account_name: name.clone(),
                    amount: posting.amount,
                    posting_date: header.posting_date,
                })
            })
            .collect();

        Ok(VoucherDetail {
            due_date: voucher.due_date,
            check_number: voucher.check_number,
            payee: voucher.payee,
            remark: header.remark,
            from_account,
            recorded_at: header.recorded_at,
            lines,
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Loads every account with its classification and the posting sums
    /// accumulated over the given posting-date window.
    async fn account_activities(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AccountActivity>, ReportError> {
        let profiles = self.classified_accounts().await?;

        let transaction_ids = self.transaction_ids_in_window(from, to).await?;
        let sums = if transaction_ids.is_empty() {
            HashMap::new()
        } else {
            let postings = account_transaction::Entity::find()
                .filter(account_transaction::Column::TransactionId.is_in(transaction_ids))
                .all(&self.db)
                .await?;
            fold_postings(&postings)
        };

        Ok(profiles
            .into_iter()
            .map(|profile| {
                let (debits, credits) = sums
                    .get(&profile.account_id.into_inner())
                    .copied()
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                AccountActivity {
                    profile,
                    debits,
                    credits,
                }
            })
            .collect())
    }

    /// Loads the full chart with classification paths.
    async fn classified_accounts(&self) -> Result<Vec<AccountProfile>, ReportError> {
        let mains: HashMap<Uuid, MainAccountKind> = main_account::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| Ok((m.id, MainAccountKind::from_str(&m.name)?)))
            .collect::<Result<_, UnknownMainAccount>>()?;

        let subs: HashMap<Uuid, sub_account::Model> = sub_account::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let categories: HashMap<Uuid, account_category::Model> =
            account_category::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect();

        let accounts = account::Entity::find()
            .order_by_asc(account::Column::Code)
            .all(&self.db)
            .await?;

        let mut profiles = Vec::with_capacity(accounts.len());
        for acct in accounts {
            let Some(category) = categories.get(&acct.account_category_id) else {
                continue;
            };
            let Some(sub) = subs.get(&category.sub_account_id) else {
                continue;
            };
            let Some(main) = mains.get(&sub.main_account_id) else {
                continue;
            };

            profiles.push(AccountProfile {
                account_id: AccountId::from_uuid(acct.id),
                code: acct.code,
                name: acct.name,
                main: *main,
                sub_account_code: sub.code,
                sub_account: sub.name.clone(),
                category_code: category.code,
                category: category.name.clone(),
            });
        }

        Ok(profiles)
    }

    /// Transaction IDs whose posting date falls inside the window.
    async fn transaction_ids_in_window(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Uuid>, ReportError> {
        let mut query = transaction::Entity::find();

        if let Some(from_date) = from {
            query = query.filter(transaction::Column::PostingDate.gte(from_date));
        }
        if let Some(to_date) = to {
            query = query.filter(transaction::Column::PostingDate.lte(to_date));
        }

        let ids: Vec<Uuid> = query
            .select_only()
            .column(transaction::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(ids)
    }

    /// Fetches transaction headers by ID into a lookup map.
    async fn transaction_headers(
        &self,
        ids: impl Iterator<Item = Uuid>,
    ) -> Result<HashMap<Uuid, transaction::Model>, ReportError> {
        let ids: Vec<Uuid> = ids.collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let headers = transaction::Entity::find()
            .filter(transaction::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(headers.into_iter().map(|t| (t.id, t)).collect())
    }

    /// Fetches account codes and names by ID into a lookup map.
    async fn account_names(
        &self,
        ids: impl Iterator<Item = Uuid>,
    ) -> Result<HashMap<Uuid, (i32, String)>, ReportError> {
        let ids: Vec<Uuid> = ids.collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let accounts = account::Entity::find()
            .filter(account::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(accounts
            .into_iter()
            .map(|a| (a.id, (a.code, a.name)))
            .collect())
    }

    /// Name of the account credited by a transaction, if any.
    async fn credited_account_name(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<String>, ReportError> {
        let credit = account_transaction::Entity::find()
            .filter(account_transaction::Column::TransactionId.eq(transaction_id))
            .filter(account_transaction::Column::Side.eq(PostingSide::Credit))
            .order_by_asc(account_transaction::Column::Id)
            .one(&self.db)
            .await?;

        let Some(credit) = credit else {
            return Ok(None);
        };

        let account = account::Entity::find_by_id(credit.account_id)
            .one(&self.db)
            .await?;
        Ok(account.map(|a| a.name))
    }
}

/// Folds posting rows into per-account (debit, credit) sums.
fn fold_postings(postings: &[account_transaction::Model]) -> HashMap<Uuid, (Decimal, Decimal)> {
    let mut sums: HashMap<Uuid, (Decimal, Decimal)> = HashMap::new();
    for posting in postings {
        let entry = sums
            .entry(posting.account_id)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match posting.side {
            PostingSide::Debit => entry.0 += posting.amount,
            PostingSide::Credit => entry.1 += posting.amount,
        }
    }
    sums
}

/// Half-open day window [00:00 of `date`, 00:00 of the next day).
fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_hms_opt(0, 0, 0).expect("midnight exists");
    (start, start + chrono::Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn posting(account_id: Uuid, side: PostingSide, amount: Decimal) -> account_transaction::Model {
        account_transaction::Model {
            id: Uuid::now_v7(),
            transaction_id: Uuid::now_v7(),
            account_id,
            side,
            amount,
        }
    }

    #[test]
    fn test_fold_postings_sums_per_side() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let postings = vec![
            posting(a, PostingSide::Debit, dec!(100)),
            posting(a, PostingSide::Credit, dec!(30)),
            posting(a, PostingSide::Debit, dec!(20)),
            posting(b, PostingSide::Credit, dec!(90)),
        ];

        let sums = fold_postings(&postings);
        assert_eq!(sums[&a], (dec!(120), dec!(30)));
        assert_eq!(sums[&b], (dec!(0), dec!(90)));
    }

    #[test]
    fn test_fold_postings_empty() {
        assert!(fold_postings(&[]).is_empty());
    }

    #[test]
    fn test_day_bounds_cover_one_day() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(start.date(), date);
        assert_eq!(end.date(), date + chrono::Duration::days(1));
        assert_eq!(end - start, chrono::Duration::days(1));
    }
}
