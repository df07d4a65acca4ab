//! `SeaORM` Entity for the `transaction` table.
//!
//! A transaction is immutable once created: it is only ever inserted and
//! referenced, never updated. `recorded_at` is the server-assigned creation
//! timestamp; `posting_date` is the accounting-period date supplied by the
//! caller.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub recorded_at: DateTime,
    pub posting_date: Date,
    pub source_ref: Option<Uuid>,
    pub remark: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::account_transaction::Entity")]
    AccountTransaction,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::account_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
