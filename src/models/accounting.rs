//! Accounting records.

use std::fmt;

use chrono::NaiveDate;

use super::ymd;
use crate::store::Entity;
use crate::table::{CellValue, Record, RecordId};

/// Bank account lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountStatus {
    #[default]
    Active,
    Frozen,
    Closed,
}

impl AccountStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Frozen, Self::Closed];

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Frozen => "Frozen",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankAccount {
    pub id: RecordId,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub currency: String,
    pub balance: f64,
    pub status: AccountStatus,
    pub opened_on: NaiveDate,
}

impl Record for BankAccount {
    const FIELDS: &'static [&'static str] = &[
        "bank_name",
        "account_name",
        "account_number",
        "currency",
        "balance",
        "status",
        "opened_on",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "bank_name" => CellValue::from(&self.bank_name),
            "account_name" => CellValue::from(&self.account_name),
            "account_number" => CellValue::from(&self.account_number),
            "currency" => CellValue::from(&self.currency),
            "balance" => CellValue::from(self.balance),
            "status" => CellValue::from(self.status.label()),
            "opened_on" => CellValue::from(self.opened_on),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for BankAccount {
    const NOUN: &'static str = "bank account";

    fn label(&self) -> String {
        format!("{} ({})", self.account_name, self.account_number)
    }
}

#[rustfmt::skip]
pub fn demo_bank_accounts() -> Vec<BankAccount> {
    let account = |id, bank: &str, name: &str, number: &str, currency: &str, balance, status, opened_on| BankAccount {
        id,
        bank_name: bank.to_string(),
        account_name: name.to_string(),
        account_number: number.to_string(),
        currency: currency.to_string(),
        balance,
        status,
        opened_on,
    };
    vec![
        account(1, "First National", "Operating", "100-2003-4411", "USD", 184_250.75, AccountStatus::Active, ymd(2019, 3, 4)),
        account(2, "First National", "Payroll", "100-2003-4412", "USD", 62_400.00, AccountStatus::Active, ymd(2019, 3, 4)),
        account(3, "Harbor Savings", "Tax Reserve", "778-10-2291", "USD", 41_980.10, AccountStatus::Active, ymd(2020, 1, 15)),
        account(4, "Banque Europa", "EU Sales", "FR76-3000-4000", "EUR", 27_315.55, AccountStatus::Active, ymd(2021, 6, 1)),
        account(5, "Harbor Savings", "Legacy Escrow", "778-10-1187", "USD", 0.0, AccountStatus::Closed, ymd(2016, 9, 20)),
        account(6, "Pacific Trust", "Capital Projects", "PT-55-9012", "USD", 350_000.00, AccountStatus::Frozen, ymd(2022, 11, 7)),
        account(7, "Banque Europa", "EU Payables", "FR76-3000-4001", "EUR", 8_120.40, AccountStatus::Active, ymd(2021, 6, 1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_cover_every_key() {
        let account = &demo_bank_accounts()[0];
        for key in BankAccount::FIELDS {
            assert!(!account.field(key).is_empty(), "{key} should map to a value");
        }
        assert!(account.field("nope").is_empty());
    }

    #[test]
    fn test_status_field_uses_label() {
        let frozen = demo_bank_accounts().into_iter().find(|a| a.status == AccountStatus::Frozen).unwrap();
        assert_eq!(frozen.field("status").to_string(), "Frozen");
    }

    #[test]
    fn test_demo_ids_unique() {
        let accounts = demo_bank_accounts();
        let mut ids: Vec<_> = accounts.iter().map(|a| a.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), accounts.len());
    }
}
