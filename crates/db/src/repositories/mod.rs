//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod chart;
pub mod posting;
pub mod report;

pub use chart::{ChartError, ChartRepository, ChartRow};
pub use posting::{
    DepositInput, JournalEntryInput, PaymentVoucherInput, PostingEngine, PostingError,
};
pub use report::{
    LedgerRow, ReportError, ReportRepository, TransactionLine, VoucherDetail, VoucherLine,
    VoucherSummary,
};
