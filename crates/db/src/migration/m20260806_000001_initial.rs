//! Initial database migration.
//!
//! Creates the ledger schema: the classification hierarchy, accounts,
//! transactions, postings, the voucher/deposit extension tables, and the
//! issuer table, then seeds the six fixed main accounts.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USER_SQL).await?;
        db.execute_unprepared(CLASSIFICATION_SQL).await?;
        db.execute_unprepared(ACCOUNT_SQL).await?;
        db.execute_unprepared(TRANSACTION_SQL).await?;
        db.execute_unprepared(POSTING_SQL).await?;
        db.execute_unprepared(EXTENSION_SQL).await?;
        db.execute_unprepared(SEED_MAIN_ACCOUNTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Posting side
CREATE TYPE posting_side AS ENUM ('DR', 'CR');
";

const USER_SQL: &str = r#"
-- Issuing users (no authentication, identity only)
CREATE TABLE "user" (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
"#;

const CLASSIFICATION_SQL: &str = r"
-- Three-level classification above accounts
CREATE TABLE main_account (
    id UUID PRIMARY KEY,
    code INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE sub_account (
    id UUID PRIMARY KEY,
    main_account_id UUID NOT NULL REFERENCES main_account(id),
    code INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL
);

CREATE TABLE account_category (
    id UUID PRIMARY KEY,
    sub_account_id UUID NOT NULL REFERENCES sub_account(id),
    code INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL
);
";

const ACCOUNT_SQL: &str = r"
-- Chart of accounts leaves
CREATE TABLE account (
    id UUID PRIMARY KEY,
    account_category_id UUID NOT NULL REFERENCES account_category(id),
    code INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT now()
);

CREATE INDEX idx_account_category ON account(account_category_id);
";

const TRANSACTION_SQL: &str = r#"
-- Transaction headers: insert-only, never updated or deleted
CREATE TABLE "transaction" (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES "user"(id),
    recorded_at TIMESTAMP NOT NULL,
    posting_date DATE NOT NULL,
    source_ref UUID,
    remark TEXT
);

CREATE INDEX idx_transaction_posting_date ON "transaction"(posting_date);
CREATE INDEX idx_transaction_recorded_at ON "transaction"(recorded_at);
"#;

const POSTING_SQL: &str = r#"
-- Postings: one positive amount per side per row
CREATE TABLE account_transaction (
    id UUID PRIMARY KEY,
    transaction_id UUID NOT NULL REFERENCES "transaction"(id),
    account_id UUID NOT NULL REFERENCES account(id),
    "type" posting_side NOT NULL,
    amount NUMERIC(20, 4) NOT NULL CHECK (amount > 0)
);

CREATE INDEX idx_posting_transaction ON account_transaction(transaction_id);
CREATE INDEX idx_posting_account ON account_transaction(account_id);
"#;

const EXTENSION_SQL: &str = r#"
-- Transaction subtype extensions (1:1 with a transaction)
CREATE TABLE payment_voucher (
    id UUID PRIMARY KEY,
    transaction_id UUID NOT NULL UNIQUE REFERENCES "transaction"(id),
    due_date DATE,
    check_number TEXT,
    payee TEXT
);

CREATE TABLE deposit (
    id UUID PRIMARY KEY,
    transaction_id UUID NOT NULL UNIQUE REFERENCES "transaction"(id)
);
"#;

const SEED_MAIN_ACCOUNTS_SQL: &str = r"
-- The fixed main accounts, in statement order
INSERT INTO main_account (id, code, name) VALUES
    ('00000000-0000-0000-0000-00000000000a', 1, 'Assets'),
    ('00000000-0000-0000-0000-00000000000b', 2, 'Liabilities'),
    ('00000000-0000-0000-0000-00000000000c', 3, 'Equity'),
    ('00000000-0000-0000-0000-00000000000d', 4, 'Expenses'),
    ('00000000-0000-0000-0000-00000000000e', 5, 'Revenue'),
    ('00000000-0000-0000-0000-00000000000f', 6, 'Other Revenue')
ON CONFLICT (code) DO NOTHING;
";

const DROP_ALL_SQL: &str = r#"
DROP TABLE IF EXISTS deposit;
DROP TABLE IF EXISTS payment_voucher;
DROP TABLE IF EXISTS account_transaction;
DROP TABLE IF EXISTS "transaction";
DROP TABLE IF EXISTS account;
DROP TABLE IF EXISTS account_category;
DROP TABLE IF EXISTS sub_account;
DROP TABLE IF EXISTS main_account;
DROP TABLE IF EXISTS "user";
DROP TYPE IF EXISTS posting_side;
"#;
