//! Sales order records.

use std::fmt;

use chrono::NaiveDate;

use super::ymd;
use crate::store::Entity;
use crate::table::{CellValue, Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Draft,
    Confirmed,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 4] = [Self::Draft, Self::Confirmed, Self::Shipped, Self::Cancelled];

    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Confirmed => "Confirmed",
            Self::Shipped => "Shipped",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesOrder {
    pub id: RecordId,
    pub order_number: String,
    /// Free-text customer name.
    pub customer: String,
    pub order_date: NaiveDate,
    pub items: u32,
    pub total: f64,
    pub status: OrderStatus,
}

impl Record for SalesOrder {
    const FIELDS: &'static [&'static str] = &["order_number", "customer", "order_date", "items", "total", "status"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "order_number" => CellValue::from(&self.order_number),
            "customer" => CellValue::from(&self.customer),
            "order_date" => CellValue::from(self.order_date),
            "items" => CellValue::from(self.items),
            "total" => CellValue::from(self.total),
            "status" => CellValue::from(self.status.label()),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for SalesOrder {
    const NOUN: &'static str = "sales order";

    fn label(&self) -> String {
        self.order_number.clone()
    }
}

pub fn demo_sales_orders() -> Vec<SalesOrder> {
    let order = |id, number: &str, customer: &str, order_date, items, total, status| SalesOrder {
        id,
        order_number: number.to_string(),
        customer: customer.to_string(),
        order_date,
        items,
        total,
        status,
    };
    vec![
        order(1, "SO-24001", "Northwind Traders", ymd(2024, 1, 8), 12, 4_380.00, OrderStatus::Shipped),
        order(2, "SO-24002", "Contoso Ltd", ymd(2024, 1, 19), 3, 987.00, OrderStatus::Shipped),
        order(3, "SO-24003", "Fabrikam Inc", ymd(2024, 2, 2), 40, 13_160.00, OrderStatus::Confirmed),
        order(4, "SO-24004", "Northwind Traders", ymd(2024, 2, 14), 1, 649.00, OrderStatus::Cancelled),
        order(5, "SO-24005", "Adventure Works", ymd(2024, 2, 27), 25, 2_975.00, OrderStatus::Confirmed),
        order(6, "SO-24006", "Tailspin Toys", ymd(2024, 3, 5), 6, 1_134.00, OrderStatus::Draft),
        order(7, "SO-24007", "Contoso Ltd", ymd(2024, 3, 6), 18, 5_922.00, OrderStatus::Draft),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip_through_all() {
        let labels: Vec<_> = OrderStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Draft", "Confirmed", "Shipped", "Cancelled"]);
    }

    #[test]
    fn test_customer_is_searchable_field() {
        let order = &demo_sales_orders()[0];
        assert_eq!(order.field("customer").to_string(), "Northwind Traders");
        assert_eq!(order.field("items").to_string(), "12");
    }
}
