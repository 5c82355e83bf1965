//! Initial database migration.
//!
//! Creates the tables the income statement reads: companies, fiscal years,
//! the cost center and account trees, general-ledger entries, budgets, and
//! report-class directives.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ORGANISATION
        // ============================================================
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(FISCAL_YEARS_SQL).await?;
        db.execute_unprepared(COST_CENTERS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS & LEDGER
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(GL_ENTRIES_SQL).await?;

        // ============================================================
        // PART 3: BUDGETS
        // ============================================================
        db.execute_unprepared(BUDGETS_SQL).await?;

        // ============================================================
        // PART 4: CLASSIFICATION
        // ============================================================
        db.execute_unprepared(DIRECTIVES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    name        VARCHAR(140) PRIMARY KEY,
    disabled    BOOLEAN NOT NULL DEFAULT FALSE
);
";

const FISCAL_YEARS_SQL: &str = r"
CREATE TABLE fiscal_years (
    name        VARCHAR(140) PRIMARY KEY,
    start_date  DATE NOT NULL,
    end_date    DATE NOT NULL,
    disabled    BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT chk_fiscal_year_dates CHECK (start_date <= end_date)
);

CREATE INDEX idx_fiscal_years_dates ON fiscal_years(start_date, end_date);
";

const COST_CENTERS_SQL: &str = r"
CREATE TABLE cost_centers (
    name                VARCHAR(140) PRIMARY KEY,
    company             VARCHAR(140) NOT NULL REFERENCES companies(name),
    parent_cost_center  VARCHAR(140) REFERENCES cost_centers(name),
    is_group            BOOLEAN NOT NULL DEFAULT FALSE,
    lft                 INTEGER NOT NULL DEFAULT 0,
    rgt                 INTEGER NOT NULL DEFAULT 0,
    disabled            BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE INDEX idx_cost_centers_company ON cost_centers(company);
CREATE INDEX idx_cost_centers_nested_set ON cost_centers(lft, rgt);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    code                VARCHAR(140) PRIMARY KEY,
    account_name        VARCHAR(255) NOT NULL,
    company             VARCHAR(140) NOT NULL REFERENCES companies(name),
    root_type           VARCHAR(20) NOT NULL,
    account_type        VARCHAR(140) NOT NULL DEFAULT '',
    report_class        VARCHAR(140),
    parent_account      VARCHAR(140) REFERENCES accounts(code),
    is_group            BOOLEAN NOT NULL DEFAULT FALSE,
    include_in_gross    BOOLEAN NOT NULL DEFAULT FALSE,
    lft                 INTEGER NOT NULL DEFAULT 0,
    rgt                 INTEGER NOT NULL DEFAULT 0,
    disabled            BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT chk_accounts_root_type
        CHECK (root_type IN ('Income', 'Expense', 'Asset', 'Liability', 'Equity'))
);

CREATE INDEX idx_accounts_company_root ON accounts(company, root_type, lft);
";

const GL_ENTRIES_SQL: &str = r"
CREATE TABLE gl_entries (
    id              UUID PRIMARY KEY,
    company         VARCHAR(140) NOT NULL REFERENCES companies(name),
    account         VARCHAR(140) NOT NULL REFERENCES accounts(code),
    posting_date    DATE NOT NULL,
    debit           NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit          NUMERIC(19, 4) NOT NULL DEFAULT 0,
    cost_center     VARCHAR(140) REFERENCES cost_centers(name),
    is_cancelled    BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT chk_gl_entries_non_negative CHECK (debit >= 0 AND credit >= 0)
);

CREATE INDEX idx_gl_entries_window ON gl_entries(company, posting_date)
    WHERE is_cancelled = FALSE;
CREATE INDEX idx_gl_entries_account ON gl_entries(account);
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    name            VARCHAR(140) PRIMARY KEY,
    company         VARCHAR(140) NOT NULL REFERENCES companies(name),
    fiscal_year     VARCHAR(140) NOT NULL REFERENCES fiscal_years(name),
    cost_center     VARCHAR(140) REFERENCES cost_centers(name),
    docstatus       SMALLINT NOT NULL DEFAULT 0
);

CREATE INDEX idx_budgets_lookup ON budgets(company, fiscal_year, docstatus);

CREATE TABLE budget_accounts (
    id              UUID PRIMARY KEY,
    budget          VARCHAR(140) NOT NULL REFERENCES budgets(name) ON DELETE CASCADE,
    account         VARCHAR(140) NOT NULL REFERENCES accounts(code),
    budget_amount   NUMERIC(19, 4) NOT NULL DEFAULT 0
);

CREATE INDEX idx_budget_accounts_budget ON budget_accounts(budget);
";

const DIRECTIVES_SQL: &str = r"
CREATE TABLE report_class_directives (
    id              UUID PRIMARY KEY,
    report_class    VARCHAR(140) NOT NULL,
    framework       VARCHAR(140),
    is_direct       BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE UNIQUE INDEX idx_directives_class_framework
    ON report_class_directives(report_class, COALESCE(framework, ''));
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS report_class_directives CASCADE;
DROP TABLE IF EXISTS budget_accounts CASCADE;
DROP TABLE IF EXISTS budgets CASCADE;
DROP TABLE IF EXISTS gl_entries CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS cost_centers CASCADE;
DROP TABLE IF EXISTS fiscal_years CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
";
