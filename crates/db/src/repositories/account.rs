//! Companies and the chart of accounts.

use ledgerview_core::accounts::{Account, RootType};
use ledgerview_core::store::{AccountStore, CompanyStore, StoreError};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::{SeaOrmStore, db_err};
use crate::entities::{accounts, companies};

/// Converts a row into the core account type.
///
/// # Errors
///
/// Returns `StoreError::Backend` if the stored root type is not recognised.
pub fn into_account(model: accounts::Model) -> Result<Account, StoreError> {
    let root_type: RootType = model
        .root_type
        .parse()
        .map_err(|e| StoreError::Backend(format!("account {}: {e}", model.code)))?;

    Ok(Account {
        code: model.code,
        name: model.account_name,
        company: model.company,
        root_type,
        account_type: model.account_type,
        report_class: model.report_class,
        parent_account: model.parent_account,
        is_group: model.is_group,
        include_in_gross: model.include_in_gross,
        lft: model.lft,
        rgt: model.rgt,
        disabled: model.disabled,
    })
}

impl CompanyStore for SeaOrmStore {
    async fn list_companies(&self) -> Result<Vec<String>, StoreError> {
        let rows = companies::Entity::find()
            .filter(companies::Column::Disabled.eq(false))
            .order_by_asc(companies::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(|c| c.name).collect())
    }

    async fn company_exists(&self, company: &str) -> Result<bool, StoreError> {
        let found = companies::Entity::find_by_id(company.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.is_some())
    }
}

impl AccountStore for SeaOrmStore {
    async fn list_accounts(
        &self,
        company: &str,
        root_type: RootType,
    ) -> Result<Vec<Account>, StoreError> {
        accounts::Entity::find()
            .filter(accounts::Column::Company.eq(company))
            .filter(accounts::Column::RootType.eq(root_type.as_str()))
            .order_by_asc(accounts::Column::Lft)
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(into_account)
            .collect()
    }

    async fn get_account(&self, code: &str) -> Result<Account, StoreError> {
        let model = accounts::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| StoreError::not_found("account", code))?;
        into_account(model)
    }

    async fn list_expense_accounts(&self, company: Option<&str>) -> Result<Vec<Account>, StoreError> {
        let mut query = accounts::Entity::find()
            .filter(accounts::Column::RootType.eq(RootType::Expense.as_str()))
            .filter(accounts::Column::IsGroup.eq(false))
            .filter(accounts::Column::Disabled.eq(false));
        if let Some(company) = company {
            query = query.filter(accounts::Column::Company.eq(company));
        }

        query
            .order_by_asc(accounts::Column::AccountName)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(into_account)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn model(root_type: &str) -> accounts::Model {
        accounts::Model {
            code: "5100".to_string(),
            account_name: "Food Cost".to_string(),
            company: "Hotel".to_string(),
            root_type: root_type.to_string(),
            account_type: "Cost of Goods Sold".to_string(),
            report_class: Some("Food".to_string()),
            parent_account: Some("5000".to_string()),
            is_group: false,
            include_in_gross: false,
            lft: 11,
            rgt: 12,
            disabled: false,
        }
    }

    #[rstest]
    #[case("Expense", RootType::Expense)]
    #[case("income", RootType::Income)]
    #[case(" Liability ", RootType::Liability)]
    fn test_into_account_parses_root_type(#[case] stored: &str, #[case] expected: RootType) {
        assert_eq!(into_account(model(stored)).unwrap().root_type, expected);
    }

    #[test]
    fn test_into_account_maps_fields() {
        let account = into_account(model("Expense")).unwrap();
        assert_eq!(account.name, "Food Cost");
        assert_eq!(account.report_class(), Some("Food"));
        assert!(account.is_reportable());
    }

    #[test]
    fn test_into_account_rejects_unknown_root_type() {
        let err = into_account(model("Revenue")).unwrap_err();
        assert!(matches!(err, StoreError::Backend(msg) if msg.contains("5100")));
    }
}
