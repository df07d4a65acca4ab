//! Core bookkeeping logic for Quill.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and report
//! presentation policies live here.
//!
//! # Modules
//!
//! - `chart` - Account classification hierarchy and statement ordering
//! - `clock` - Injected time source for financial-year validation
//! - `ledger` - Posting-date validation, entry expansion, conservation
//! - `reports` - Balance derivation and report presentation policy

pub mod chart;
pub mod clock;
pub mod ledger;
pub mod reports;
