//! `SeaORM` Entity for the `account` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_category_id: Uuid,
    pub code: i32,
    pub name: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_category::Entity",
        from = "Column::AccountCategoryId",
        to = "super::account_category::Column::Id"
    )]
    AccountCategory,
    #[sea_orm(has_many = "super::account_transaction::Entity")]
    AccountTransaction,
}

impl Related<super::account_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountCategory.def()
    }
}

impl Related<super::account_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
