//! General ledger postings.

use ledgerview_core::fiscal::DateWindow;
use ledgerview_core::ledger::Posting;
use ledgerview_core::store::{LedgerStore, StoreError};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::{SeaOrmStore, db_err};
use crate::entities::gl_entries;

impl From<gl_entries::Model> for Posting {
    fn from(model: gl_entries::Model) -> Self {
        Self {
            company: model.company,
            account: model.account,
            posting_date: model.posting_date,
            debit: model.debit,
            credit: model.credit,
            cost_center: model.cost_center,
            is_cancelled: model.is_cancelled,
        }
    }
}

impl LedgerStore for SeaOrmStore {
    async fn query_postings(
        &self,
        company: &str,
        window: DateWindow,
        cost_centers: Option<&[String]>,
    ) -> Result<Vec<Posting>, StoreError> {
        let mut query = gl_entries::Entity::find()
            .filter(gl_entries::Column::Company.eq(company))
            .filter(gl_entries::Column::PostingDate.between(window.from, window.to))
            .filter(gl_entries::Column::IsCancelled.eq(false));
        if let Some(cost_centers) = cost_centers {
            query = query.filter(gl_entries::Column::CostCenter.is_in(cost_centers.iter().cloned()));
        }

        let rows = query
            .order_by_asc(gl_entries::Column::PostingDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        debug!(
            company,
            from = %window.from,
            to = %window.to,
            postings = rows.len(),
            "Loaded ledger postings"
        );
        Ok(rows.into_iter().map(Posting::from).collect())
    }
}
