//! Accounting panel: bank accounts.

use chrono::{Datelike, Local, NaiveDate};
use eframe::egui::Ui;

use super::components::{back_button, choice_row, date_row, format_amount, number_row, panel_header, text_row};
use super::crud::{CrudPage, EntityForm, PageContext};
use super::table_view::TableOptions;
use crate::config::UiConfig;
use crate::error::{AppError, Result};
use crate::models::accounting::demo_bank_accounts;
use crate::models::{AccountStatus, BankAccount};
use crate::table::{Column, FilterOption, Fixed, RecordId};
use crate::validation;

/// Whole years between `opened` and `today`.
fn years_open(opened: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - opened.year();
    if (today.month(), today.day()) < (opened.month(), opened.day()) {
        years -= 1;
    }
    years.max(0)
}

pub fn bank_account_columns() -> Vec<Column<BankAccount>> {
    vec![
        Column::field("Account", "account_name")
            .sortable()
            .fixed(Fixed::Left)
            .width(150.0),
        Column::field("Bank", "bank_name").sortable().filters(vec![
            FilterOption::same("First National"),
            FilterOption::same("Harbor Savings"),
            FilterOption::same("Banque Europa"),
            FilterOption::same("Pacific Trust"),
        ]),
        Column::field("Number", "account_number").width(140.0),
        Column::field("Currency", "currency")
            .filters(vec![FilterOption::same("USD"), FilterOption::same("EUR")])
            .width(80.0),
        Column::field("Balance", "balance")
            .render(|a: &BankAccount| format!("{} {}", a.currency, format_amount(a.balance)))
            .sortable()
            .width(140.0),
        Column::field("Status", "status")
            .filters(AccountStatus::ALL.iter().map(|s| FilterOption::same(s.label())).collect())
            .fixed(Fixed::Right)
            .width(80.0),
        Column::field("Opened", "opened_on").sortable().width(100.0),
        Column::computed("Years Open", |a: &BankAccount| years_open(a.opened_on, Local::now().date_naive()).to_string())
            .sort_with(|a: &BankAccount, b: &BankAccount| b.opened_on.cmp(&a.opened_on))
            .width(80.0),
    ]
}

pub struct BankAccountForm {
    bank_name: String,
    account_name: String,
    account_number: String,
    currency: String,
    balance: String,
    status: AccountStatus,
    opened_on: NaiveDate,
}

impl Default for BankAccountForm {
    fn default() -> Self {
        Self {
            bank_name: String::new(),
            account_name: String::new(),
            account_number: String::new(),
            currency: "USD".to_string(),
            balance: "0".to_string(),
            status: AccountStatus::Active,
            opened_on: Local::now().date_naive(),
        }
    }
}

impl EntityForm<BankAccount> for BankAccountForm {
    fn from_entity(a: &BankAccount) -> Self {
        Self {
            bank_name: a.bank_name.clone(),
            account_name: a.account_name.clone(),
            account_number: a.account_number.clone(),
            currency: a.currency.clone(),
            balance: format!("{:.2}", a.balance),
            status: a.status,
            opened_on: a.opened_on,
        }
    }

    fn build(&self, id: RecordId) -> Result<BankAccount> {
        let currency = validation::required("Currency", &self.currency)?.to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::validation("Currency must be a 3-letter code"));
        }

        Ok(BankAccount {
            id,
            bank_name: validation::required("Bank", &self.bank_name)?,
            account_name: validation::required("Account name", &self.account_name)?,
            account_number: validation::required("Account number", &self.account_number)?,
            currency,
            balance: validation::decimal("Balance", &self.balance)?,
            status: self.status,
            opened_on: self.opened_on,
        })
    }

    fn show(&mut self, ui: &mut Ui, read_only: bool) {
        text_row(ui, "Bank", &mut self.bank_name, read_only);
        text_row(ui, "Account name", &mut self.account_name, read_only);
        text_row(ui, "Account number", &mut self.account_number, read_only);
        text_row(ui, "Currency", &mut self.currency, read_only);
        number_row(ui, "Balance", &mut self.balance, read_only);
        choice_row(
            ui,
            "Status",
            "account_status",
            &mut self.status,
            &AccountStatus::ALL,
            |s| s.label().to_string(),
            read_only,
        );
        date_row(ui, "Opened on", "account_opened", &mut self.opened_on, read_only);
    }
}

pub struct AccountingPanel {
    accounts: CrudPage<BankAccount, BankAccountForm>,
}

impl AccountingPanel {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            accounts: CrudPage::new("Bank Accounts", bank_account_columns(), demo_bank_accounts())
                .with_layout(config.default_page_size, config.modal_width)
                .with_options(
                    TableOptions::new("bank_accounts_table")
                        .add_label("Open Account")
                        .search_hint("Search accounts, banks, numbers..."),
                ),
        }
    }

    pub fn accounts(&self) -> &CrudPage<BankAccount, BankAccountForm> {
        &self.accounts
    }

    /// Show the accounting panel.
    ///
    /// Returns `true` if the back button was clicked.
    pub fn show(&mut self, ui: &mut Ui, ctx: &mut PageContext<'_>) -> bool {
        let go_back = back_button(ui);
        panel_header(ui, "Accounting - Bank Accounts");
        self.accounts.show(ui, ctx);
        go_back
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ymd;
    use crate::ui::notify::Toasts;

    fn page() -> CrudPage<BankAccount, BankAccountForm> {
        AccountingPanel::new(&UiConfig::default()).accounts
    }

    #[test]
    fn test_years_open() {
        assert_eq!(years_open(ymd(2020, 6, 1), ymd(2024, 5, 31)), 3);
        assert_eq!(years_open(ymd(2020, 6, 1), ymd(2024, 6, 1)), 4);
        assert_eq!(years_open(ymd(2025, 1, 1), ymd(2024, 1, 1)), 0);
    }

    #[test]
    fn test_status_and_currency_filters_combine() {
        let mut page = page();
        let status = page.table().columns().iter().position(|c| c.title == "Status").unwrap();
        let currency = page.table().columns().iter().position(|c| c.title == "Currency").unwrap();

        page.table_mut().set_filter(status, ["Active", "Frozen"]);
        assert_eq!(page.table().visible_len(), 6);

        page.table_mut().set_filter(currency, ["EUR"]);
        let names: Vec<_> = page.table().visible_rows().iter().map(|a| a.account_name.clone()).collect();
        assert_eq!(names, vec!["EU Sales", "EU Payables"]);
    }

    #[test]
    fn test_balance_sorts_numerically() {
        let mut page = page();
        let balance = page.table().columns().iter().position(|c| c.title == "Balance").unwrap();
        page.table_mut().toggle_sort(balance);
        let first = page.table().visible_rows()[0].account_name.clone();
        assert_eq!(first, "Legacy Escrow");
        page.table_mut().toggle_sort(balance);
        let first = page.table().visible_rows()[0].account_name.clone();
        assert_eq!(first, "Capital Projects");
    }

    #[test]
    fn test_csv_skips_computed_column() {
        let page = page();
        let csv = page.table().to_csv();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "Account,Bank,Number,Currency,Balance,Status,Opened");
        assert_eq!(csv.lines().count(), 8);
        assert!(csv.contains("Operating,First National,100-2003-4411,USD,184250.75,Active,2019-03-04"));
    }

    #[test]
    fn test_currency_validated() {
        let form = BankAccountForm {
            bank_name: "Pacific Trust".to_string(),
            account_name: "Reserve".to_string(),
            account_number: "PT-1".to_string(),
            currency: "dollars".to_string(),
            ..Default::default()
        };
        let err = form.build(1).unwrap_err();
        assert_eq!(err.to_string(), "Currency must be a 3-letter code");

        let form = BankAccountForm {
            currency: "gbp".to_string(),
            ..form
        };
        assert_eq!(form.build(1).unwrap().currency, "GBP");
    }

    #[test]
    fn test_create_account() {
        let mut page = page();
        let mut toasts = Toasts::new(4);
        page.open_create();
        let session = page.editor_mut().unwrap();
        session.form.bank_name = "Pacific Trust".to_string();
        session.form.account_name = "Reserve".to_string();
        session.form.account_number = "PT-55-0001".to_string();
        session.form.balance = "1,500.25".to_string();

        assert!(page.submit(&mut toasts));
        let created = page.store().get(8).unwrap();
        assert_eq!(created.balance, 1500.25);
        assert_eq!(created.status, AccountStatus::Active);
    }
}
