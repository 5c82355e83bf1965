//! Fiscal years and the cost center tree.

use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;
use ledgerview_core::fiscal::FiscalYear;
use ledgerview_core::store::{CostCenterStore, FiscalYearStore, StoreError};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::{SeaOrmStore, db_err};
use crate::entities::{cost_centers, fiscal_years};

fn into_fiscal_year(model: fiscal_years::Model) -> FiscalYear {
    FiscalYear {
        name: model.name,
        start_date: model.start_date,
        end_date: model.end_date,
    }
}

/// Walks parent links breadth-first from `root`, returning `root` first.
///
/// Cycles in the parent links are tolerated; each node appears once.
pub fn descendants(all: &[cost_centers::Model], root: &str) -> Vec<String> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for cc in all {
        if let Some(parent) = cc.parent_cost_center.as_deref() {
            children.entry(parent).or_default().push(cc.name.as_str());
        }
    }

    let mut expanded = vec![root.to_string()];
    let mut queue = VecDeque::from([root]);
    while let Some(parent) = queue.pop_front() {
        for &child in children.get(parent).into_iter().flatten() {
            if !expanded.iter().any(|name| name == child) {
                expanded.push(child.to_string());
                queue.push_back(child);
            }
        }
    }
    expanded
}

impl FiscalYearStore for SeaOrmStore {
    async fn get_fiscal_year(&self, name: &str) -> Result<FiscalYear, StoreError> {
        fiscal_years::Entity::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(into_fiscal_year)
            .ok_or_else(|| StoreError::not_found("fiscal year", name))
    }

    async fn find_fiscal_year_containing(
        &self,
        date: NaiveDate,
    ) -> Result<Option<FiscalYear>, StoreError> {
        let found = fiscal_years::Entity::find()
            .filter(fiscal_years::Column::StartDate.lte(date))
            .filter(fiscal_years::Column::EndDate.gte(date))
            .filter(fiscal_years::Column::Disabled.eq(false))
            .order_by_asc(fiscal_years::Column::StartDate)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(into_fiscal_year))
    }

    async fn list_fiscal_years(&self) -> Result<Vec<FiscalYear>, StoreError> {
        let rows = fiscal_years::Entity::find()
            .filter(fiscal_years::Column::Disabled.eq(false))
            .order_by_desc(fiscal_years::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(into_fiscal_year).collect())
    }
}

impl CostCenterStore for SeaOrmStore {
    async fn expand_with_descendants(&self, code: &str) -> Result<Vec<String>, StoreError> {
        let root = cost_centers::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| StoreError::not_found("cost center", code))?;

        let tree = cost_centers::Entity::find()
            .filter(cost_centers::Column::Company.eq(root.company.as_str()))
            .order_by_asc(cost_centers::Column::Lft)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(descendants(&tree, &root.name))
    }

    async fn list_cost_centers(&self, company: Option<&str>) -> Result<Vec<String>, StoreError> {
        let mut query = cost_centers::Entity::find()
            .filter(cost_centers::Column::IsGroup.eq(false))
            .filter(cost_centers::Column::Disabled.eq(false));
        if let Some(company) = company {
            query = query.filter(cost_centers::Column::Company.eq(company));
        }

        let rows = query
            .order_by_asc(cost_centers::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(|cc| cc.name).collect())
    }
}
