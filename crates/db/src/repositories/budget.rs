//! Submitted budgets and report-class directives.

use std::collections::BTreeMap;

use ledgerview_core::classify::ReportClassDirectives;
use ledgerview_core::store::{BudgetStore, DirectiveStore, StoreError};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select};

use super::{SeaOrmStore, db_err};
use crate::entities::{budget_accounts, budgets, report_class_directives};

/// Folds directive rows into a map. Unscoped rows apply first so that rows
/// scoped to `framework` override them; rows for other frameworks are ignored.
pub fn fold_directives(
    rows: &[report_class_directives::Model],
    framework: Option<&str>,
) -> ReportClassDirectives {
    let mut directives = ReportClassDirectives::new();
    for row in rows.iter().filter(|r| r.framework.is_none()) {
        directives.insert(&row.report_class, row.is_direct);
    }
    if let Some(framework) = framework {
        for row in rows
            .iter()
            .filter(|r| r.framework.as_deref() == Some(framework))
        {
            directives.insert(&row.report_class, row.is_direct);
        }
    }
    directives
}

fn submitted_budgets(
    fiscal_year: &str,
    cost_centers: Option<&[String]>,
) -> Select<budgets::Entity> {
    let mut query = budgets::Entity::find()
        .filter(budgets::Column::FiscalYear.eq(fiscal_year))
        .filter(budgets::Column::Docstatus.eq(budgets::SUBMITTED));
    if let Some(cost_centers) = cost_centers {
        query = query.filter(budgets::Column::CostCenter.is_in(cost_centers.iter().cloned()));
    }
    query
}

impl SeaOrmStore {
    async fn budget_names(
        &self,
        query: Select<budgets::Entity>,
    ) -> Result<Vec<String>, StoreError> {
        let rows = query.all(&self.db).await.map_err(db_err)?;
        Ok(rows.into_iter().map(|b| b.name).collect())
    }
}

impl BudgetStore for SeaOrmStore {
    async fn get_budget_amount(
        &self,
        fiscal_year: &str,
        account: &str,
        cost_centers: Option<&[String]>,
    ) -> Result<Decimal, StoreError> {
        let names = self
            .budget_names(submitted_budgets(fiscal_year, cost_centers))
            .await?;
        if names.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let lines = budget_accounts::Entity::find()
            .filter(budget_accounts::Column::Budget.is_in(names))
            .filter(budget_accounts::Column::Account.eq(account))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(lines.into_iter().map(|line| line.budget_amount).sum())
    }

    async fn budget_amounts(
        &self,
        company: &str,
        fiscal_year: &str,
        cost_centers: Option<&[String]>,
    ) -> Result<BTreeMap<String, Decimal>, StoreError> {
        let names = self
            .budget_names(
                submitted_budgets(fiscal_year, cost_centers)
                    .filter(budgets::Column::Company.eq(company)),
            )
            .await?;
        if names.is_empty() {
            return Ok(BTreeMap::new());
        }

        let lines = budget_accounts::Entity::find()
            .filter(budget_accounts::Column::Budget.is_in(names))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut amounts = BTreeMap::new();
        for line in lines {
            *amounts.entry(line.account).or_insert(Decimal::ZERO) += line.budget_amount;
        }
        Ok(amounts)
    }
}

impl DirectiveStore for SeaOrmStore {
    async fn directive_map(
        &self,
        framework: Option<&str>,
    ) -> Result<ReportClassDirectives, StoreError> {
        let mut query = report_class_directives::Entity::find();
        query = match framework {
            Some(framework) => query.filter(
                report_class_directives::Column::Framework
                    .is_null()
                    .or(report_class_directives::Column::Framework.eq(framework)),
            ),
            None => query.filter(report_class_directives::Column::Framework.is_null()),
        };

        let rows = query
            .order_by_asc(report_class_directives::Column::ReportClass)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(fold_directives(&rows, framework))
    }
}
