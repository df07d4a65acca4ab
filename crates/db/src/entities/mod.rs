//! `SeaORM` entity definitions for the ledger schema.
//!
//! Table names follow the storage schema: `account`, `account_category`,
//! `sub_account`, `main_account`, `transaction`, `account_transaction`
//! (posting rows), `payment_voucher`, `deposit`, and `user`.

pub mod account;
pub mod account_category;
pub mod account_transaction;
pub mod deposit;
pub mod main_account;
pub mod payment_voucher;
pub mod sea_orm_active_enums;
pub mod sub_account;
pub mod transaction;
pub mod user;
