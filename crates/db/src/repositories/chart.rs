//! Chart-of-accounts administration.
//!
//! The classification hierarchy is created administratively and read-mostly:
//! the six main accounts are seeded by the initial migration, and this
//! repository adds sub-accounts, categories, and leaf accounts beneath them.
//! Accounts are never hard-deleted; once postings reference one it stays.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use quill_core::chart::MainAccountKind;
use quill_shared::error::AppError;
use quill_shared::types::{AccountId, CategoryId, SubAccountId};

use crate::entities::{account, account_category, main_account, sub_account};

/// Error types for chart operations.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Main account missing from the seeded set.
    #[error("Main account not seeded: {0}")]
    MainAccountMissing(MainAccountKind),

    /// Sub account not found.
    #[error("Sub account not found: {0}")]
    SubAccountNotFound(Uuid),

    /// Account category not found.
    #[error("Account category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::MainAccountMissing(_) => Self::Internal(err.to_string()),
            ChartError::SubAccountNotFound(_) | ChartError::CategoryNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ChartError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// One row of the chart-of-accounts listing.
///
/// Categories without accounts still appear, with the account columns
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    /// Main-account code.
    pub main_account_code: i32,
    /// Main-account name.
    pub main_account: String,
    /// Sub-account code.
    pub sub_account_code: i32,
    /// Sub-account name.
    pub sub_account: String,
    /// Category code.
    pub category_code: i32,
    /// Category name.
    pub category: String,
    /// Account code, when a leaf account exists.
    pub account_code: Option<i32>,
    /// Account name, when a leaf account exists.
    pub account_name: Option<String>,
}

/// Chart-of-accounts repository.
#[derive(Debug, Clone)]
pub struct ChartRepository {
    db: DatabaseConnection,
}

impl ChartRepository {
    /// Creates a new chart repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a sub-account under one of the fixed main accounts.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::MainAccountMissing` when the seeded main
    /// account row is absent, or a database error.
    pub async fn create_sub_account(
        &self,
        main: MainAccountKind,
        code: i32,
        name: &str,
    ) -> Result<SubAccountId, ChartError> {
        let main_row = main_account::Entity::find()
            .filter(main_account::Column::Name.eq(main.name()))
            .one(&self.db)
            .await?
            .ok_or(ChartError::MainAccountMissing(main))?;

        let id = SubAccountId::new();
        let row = sub_account::ActiveModel {
            id: Set(id.into_inner()),
            main_account_id: Set(main_row.id),
            code: Set(code),
            name: Set(name.to_string()),
        };
        row.insert(&self.db).await?;

        info!(sub_account = name, code, "sub account created");
        Ok(id)
    }

    /// Creates an account category under a sub-account.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::SubAccountNotFound` for an unknown parent, or a
    /// database error.
    pub async fn create_category(
        &self,
        sub_account_id: SubAccountId,
        code: i32,
        name: &str,
    ) -> Result<CategoryId, ChartError> {
        sub_account::Entity::find_by_id(sub_account_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ChartError::SubAccountNotFound(sub_account_id.into_inner()))?;

        let id = CategoryId::new();
        let row = account_category::ActiveModel {
            id: Set(id.into_inner()),
            sub_account_id: Set(sub_account_id.into_inner()),
            code: Set(code),
            name: Set(name.to_string()),
        };
        row.insert(&self.db).await?;

        info!(category = name, code, "account category created");
        Ok(id)
    }

    /// Creates a leaf account under a category.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::CategoryNotFound` for an unknown parent, or a
    /// database error.
    pub async fn create_account(
        &self,
        category_id: CategoryId,
        code: i32,
        name: &str,
    ) -> Result<AccountId, ChartError> {
        account_category::Entity::find_by_id(category_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ChartError::CategoryNotFound(category_id.into_inner()))?;

        let id = AccountId::new();
        let row = account::ActiveModel {
            id: Set(id.into_inner()),
            account_category_id: Set(category_id.into_inner()),
            code: Set(code),
            name: Set(name.to_string()),
            ..Default::default()
        };
        row.insert(&self.db).await?;

        info!(account = name, code, "account created");
        Ok(id)
    }

    /// The full classification listing, ordered by codes at every level.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn chart_of_accounts(&self) -> Result<Vec<ChartRow>, ChartError> {
        let mains = main_account::Entity::find()
            .order_by_asc(main_account::Column::Code)
            .all(&self.db)
            .await?;
        let subs = sub_account::Entity::find()
            .order_by_asc(sub_account::Column::Code)
            .all(&self.db)
            .await?;
        let categories = account_category::Entity::find()
            .order_by_asc(account_category::Column::Code)
            .all(&self.db)
            .await?;
        let accounts = account::Entity::find()
            .order_by_asc(account::Column::Code)
            .all(&self.db)
            .await?;

        let mut rows = Vec::new();
        for main in &mains {
            for sub in subs.iter().filter(|s| s.main_account_id == main.id) {
                for category in categories.iter().filter(|c| c.sub_account_id == sub.id) {
                    let leaves: Vec<&account::Model> = accounts
                        .iter()
                        .filter(|a| a.account_category_id == category.id)
                        .collect();

                    if leaves.is_empty() {
                        rows.push(ChartRow {
                            main_account_code: main.code,
                            main_account: main.name.clone(),
                            sub_account_code: sub.code,
                            sub_account: sub.name.clone(),
                            category_code: category.code,
                            category: category.name.clone(),
                            account_code: None,
                            account_name: None,
                        });
                        continue;
                    }

                    for leaf in leaves {
                        rows.push(ChartRow {
                            main_account_code: main.code,
                            main_account: main.name.clone(),
                            sub_account_code: sub.code,
                            sub_account: sub.name.clone(),
                            category_code: category.code,
                            category: category.name.clone(),
                            account_code: Some(leaf.code),
                            account_name: Some(leaf.name.clone()),
                        });
                    }
                }
            }
        }

        Ok(rows)
    }
}
