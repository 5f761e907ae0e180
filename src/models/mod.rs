//! Record types and demo data for the dashboard modules.

pub mod accounting;
pub mod hr;
pub mod inventory;
pub mod products;
pub mod sales;

use chrono::NaiveDate;

pub use accounting::{AccountStatus, BankAccount};
pub use hr::{Bonus, BonusStatus, Department, Employee};
pub use inventory::StockItem;
pub use products::Product;
pub use sales::{OrderStatus, SalesOrder};

/// Date literal for seed data.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
