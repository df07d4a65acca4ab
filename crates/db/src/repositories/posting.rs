//! Posting engine: turns transaction requests into balanced posting rows.
//!
//! Every write operation validates first, then opens one database
//! transaction, inserts the header, any subtype extension row, and the
//! postings in order, and commits only if every insert succeeded. Any
//! failure rolls the whole batch back before the error propagates; the
//! engine never leaves a transaction with only some of its postings
//! persisted.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, Set, TransactionTrait,
};
use tracing::{error, info};
use uuid::Uuid;

use quill_core::clock::{Clock, SystemClock};
use quill_core::ledger::{
    check_conservation, expand_deposit_lines, expand_journal_lines, expand_voucher_lines,
    validate_posting_date, CounterpartLine, JournalLine, LedgerError, PostingDraft,
};
use quill_shared::error::AppError;
use quill_shared::types::{AccountId, DepositId, PostingId, TransactionId, UserId, VoucherId};

use crate::entities::{account_transaction, deposit, payment_voucher, transaction};

/// Error types for posting operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// The request failed validation; nothing was written.
    #[error("Validation failed: {0}")]
    Validation(#[from] LedgerError),

    /// A persistence failure; the whole batch was rolled back.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PostingError> for AppError {
    fn from(err: PostingError) -> Self {
        match err {
            PostingError::Validation(inner) => Self::Validation(inner.to_string()),
            PostingError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// Input for posting a journal entry.
#[derive(Debug, Clone)]
pub struct JournalEntryInput {
    /// The issuing user.
    pub issuer: UserId,
    /// Posting date as `YYYY-MM-DD`.
    pub posting_date: String,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Optional link to a source document.
    pub source_ref: Option<Uuid>,
    /// The entry lines.
    pub lines: Vec<JournalLine>,
}

/// Input for posting a payment voucher.
#[derive(Debug, Clone)]
pub struct PaymentVoucherInput {
    /// The issuing user.
    pub issuer: UserId,
    /// Posting date as `YYYY-MM-DD`.
    pub posting_date: String,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// The account the payment is drawn from (credited).
    pub from_account: AccountId,
    /// Total amount paid out.
    pub total: Decimal,
    /// The debited counterpart lines; must sum to `total`.
    pub lines: Vec<CounterpartLine>,
    /// Check due date.
    pub due_date: Option<NaiveDate>,
    /// Check number.
    pub check_number: Option<String>,
    /// Payee name.
    pub payee: Option<String>,
}

/// Input for posting a bank deposit.
#[derive(Debug, Clone)]
pub struct DepositInput {
    /// The issuing user.
    pub issuer: UserId,
    /// Posting date as `YYYY-MM-DD`.
    pub posting_date: String,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// The account the money lands on (debited).
    pub to_account: AccountId,
    /// Total amount received.
    pub total: Decimal,
    /// The credited counterpart lines; must sum to `total`.
    pub lines: Vec<CounterpartLine>,
}

/// The posting engine.
///
/// Holds no state beyond the connection and an injected clock; concurrent
/// callers rely entirely on the storage engine's isolation.
#[derive(Clone)]
pub struct PostingEngine {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl PostingEngine {
    /// Creates a posting engine backed by the system clock.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    /// Creates a posting engine with an explicit clock, for tests that pin
    /// the financial-year boundary.
    #[must_use]
    pub fn with_clock(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Posts a journal entry: one transaction header plus one posting per
    /// present debit/credit side, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::Validation` when the posting date or entry
    /// list is rejected (before any write), and `PostingError::Database`
    /// after rolling back when any insert fails.
    pub async fn post_journal_entry(
        &self,
        input: JournalEntryInput,
    ) -> Result<TransactionId, PostingError> {
        let posting_date = validate_posting_date(&input.posting_date, self.clock.today())?;
        let postings = expand_journal_lines(&input.lines)?;
        check_conservation(&postings)?;

        let txn = self.db.begin().await?;
        let outcome = async {
            let tid = self
                .insert_header(
                    &txn,
                    input.issuer,
                    posting_date,
                    input.source_ref,
                    input.remark.as_deref(),
                )
                .await?;
            self.issue_postings(&txn, tid, &postings).await?;
            Ok::<TransactionId, PostingError>(tid)
        }
        .await;

        match outcome {
            Ok(tid) => {
                txn.commit().await?;
                info!(transaction_id = %tid, postings = postings.len(), "journal entry posted");
                Ok(tid)
            }
            Err(err) => {
                txn.rollback().await?;
                error!(error = %err, "journal entry aborted");
                Err(err)
            }
        }
    }

    /// Posts a payment voucher: header, voucher extension row, one CREDIT
    /// posting for the paying account, and one DEBIT posting per line,
    /// all-or-nothing.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::post_journal_entry`]; the line amounts
    /// must sum to the voucher total.
    pub async fn post_payment_voucher(
        &self,
        input: PaymentVoucherInput,
    ) -> Result<TransactionId, PostingError> {
        let posting_date = validate_posting_date(&input.posting_date, self.clock.today())?;
        let postings = expand_voucher_lines(input.from_account, input.total, &input.lines)?;
        check_conservation(&postings)?;

        let txn = self.db.begin().await?;
        let outcome = async {
            let tid = self
                .insert_header(&txn, input.issuer, posting_date, None, input.remark.as_deref())
                .await?;

            let voucher = payment_voucher::ActiveModel {
                id: Set(VoucherId::new().into_inner()),
                transaction_id: Set(tid.into_inner()),
                due_date: Set(input.due_date),
                check_number: Set(input.check_number.clone()),
                payee: Set(input.payee.clone()),
            };
            voucher.insert(&txn).await?;

            self.issue_postings(&txn, tid, &postings).await?;
            Ok::<TransactionId, PostingError>(tid)
        }
        .await;

        match outcome {
            Ok(tid) => {
                txn.commit().await?;
                info!(transaction_id = %tid, total = %input.total, "payment voucher posted");
                Ok(tid)
            }
            Err(err) => {
                txn.rollback().await?;
                error!(error = %err, "payment voucher aborted");
                Err(err)
            }
        }
    }

    /// Posts a bank deposit: header, deposit extension row, one DEBIT
    /// posting for the receiving account, and one CREDIT posting per line,
    /// all-or-nothing.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::post_payment_voucher`].
    pub async fn post_deposit(&self, input: DepositInput) -> Result<TransactionId, PostingError> {
        let posting_date = validate_posting_date(&input.posting_date, self.clock.today())?;
        let postings = expand_deposit_lines(input.to_account, input.total, &input.lines)?;
        check_conservation(&postings)?;

        let txn = self.db.begin().await?;
        let outcome = async {
            let tid = self
                .insert_header(&txn, input.issuer, posting_date, None, input.remark.as_deref())
                .await?;

            let extension = deposit::ActiveModel {
                id: Set(DepositId::new().into_inner()),
                transaction_id: Set(tid.into_inner()),
            };
            extension.insert(&txn).await?;

            self.issue_postings(&txn, tid, &postings).await?;
            Ok::<TransactionId, PostingError>(tid)
        }
        .await;

        match outcome {
            Ok(tid) => {
                txn.commit().await?;
                info!(transaction_id = %tid, total = %input.total, "deposit posted");
                Ok(tid)
            }
            Err(err) => {
                txn.rollback().await?;
                error!(error = %err, "deposit aborted");
                Err(err)
            }
        }
    }

    /// Creates a transaction header inside the caller's unit of work.
    ///
    /// Validates the posting date against the active financial year and
    /// stamps the server-assigned creation timestamp. The caller must abort
    /// the whole unit of work on error.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::Validation` for a bad posting date and
    /// `PostingError::Database` when the insert fails.
    pub async fn create_transaction(
        &self,
        txn: &DatabaseTransaction,
        issuer: UserId,
        posting_date: &str,
        source_ref: Option<Uuid>,
        remark: Option<&str>,
    ) -> Result<TransactionId, PostingError> {
        let posting_date = validate_posting_date(posting_date, self.clock.today())?;
        self.insert_header(txn, issuer, posting_date, source_ref, remark)
            .await
    }

    /// Inserts postings for an existing transaction, in input order.
    ///
    /// The caller must abort the whole unit of work if any insert fails; no
    /// partial posting set may ever commit.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::Database` on the first failed insert.
    pub async fn issue_postings(
        &self,
        txn: &DatabaseTransaction,
        tid: TransactionId,
        postings: &[PostingDraft],
    ) -> Result<(), PostingError> {
        for posting in postings {
            let row = account_transaction::ActiveModel {
                id: Set(PostingId::new().into_inner()),
                transaction_id: Set(tid.into_inner()),
                account_id: Set(posting.account_id.into_inner()),
                side: Set(posting.entry_type.into()),
                amount: Set(posting.amount),
            };
            row.insert(txn).await?;
        }
        Ok(())
    }

    async fn insert_header(
        &self,
        txn: &DatabaseTransaction,
        issuer: UserId,
        posting_date: NaiveDate,
        source_ref: Option<Uuid>,
        remark: Option<&str>,
    ) -> Result<TransactionId, PostingError> {
        let tid = TransactionId::new();
        let header = transaction::ActiveModel {
            id: Set(tid.into_inner()),
            user_id: Set(issuer.into_inner()),
            recorded_at: Set(self.clock.now()),
            posting_date: Set(posting_date),
            source_ref: Set(source_ref),
            remark: Set(remark.map(ToString::to_string)),
        };
        header.insert(txn).await?;
        Ok(tid)
    }
}
