//! `SeaORM` Entity for the `sub_account` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sub_account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub main_account_id: Uuid,
    pub code: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::main_account::Entity",
        from = "Column::MainAccountId",
        to = "super::main_account::Column::Id"
    )]
    MainAccount,
    #[sea_orm(has_many = "super::account_category::Entity")]
    AccountCategory,
}

impl Related<super::main_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MainAccount.def()
    }
}

impl Related<super::account_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
