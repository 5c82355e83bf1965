//! `SeaORM` Entity for accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub account_name: String,
    pub company: String,
    pub root_type: String,
    pub account_type: String,
    pub report_class: Option<String>,
    pub parent_account: Option<String>,
    pub is_group: bool,
    pub include_in_gross: bool,
    pub lft: i32,
    pub rgt: i32,
    pub disabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::Company",
        to = "super::companies::Column::Name"
    )]
    Companies,
    #[sea_orm(has_many = "super::gl_entries::Entity")]
    GlEntries,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::gl_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GlEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
