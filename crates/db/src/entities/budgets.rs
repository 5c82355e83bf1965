//! `SeaORM` Entity for budgets table.
//!
//! Only submitted budgets (`docstatus = 1`) count towards reports.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document status of a submitted budget.
pub const SUBMITTED: i16 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub company: String,
    pub fiscal_year: String,
    pub cost_center: Option<String>,
    pub docstatus: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_accounts::Entity")]
    BudgetAccounts,
}

impl Related<super::budget_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
