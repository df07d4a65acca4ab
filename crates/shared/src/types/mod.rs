//! Shared domain types.

pub mod id;

pub use id::{
    AccountId, CategoryId, DepositId, MainAccountId, PostingId, SubAccountId, TransactionId,
    UserId, VoucherId,
};
