//! Inventory records.

use chrono::NaiveDate;

use super::ymd;
use crate::store::Entity;
use crate::table::{CellValue, Record, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    pub id: RecordId,
    pub sku: String,
    pub name: String,
    pub warehouse: String,
    pub quantity: i64,
    pub reorder_level: i64,
    pub last_counted: NaiveDate,
}

impl StockItem {
    /// At or below the reorder threshold.
    pub fn is_low(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    pub fn stock_status(&self) -> &'static str {
        match (self.quantity, self.is_low()) {
            (q, _) if q <= 0 => "Out of stock",
            (_, true) => "Low stock",
            _ => "In stock",
        }
    }
}

impl Record for StockItem {
    const FIELDS: &'static [&'static str] = &["sku", "name", "warehouse", "quantity", "reorder_level", "last_counted"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "sku" => CellValue::from(&self.sku),
            "name" => CellValue::from(&self.name),
            "warehouse" => CellValue::from(&self.warehouse),
            "quantity" => CellValue::from(self.quantity),
            "reorder_level" => CellValue::from(self.reorder_level),
            "last_counted" => CellValue::from(self.last_counted),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for StockItem {
    const NOUN: &'static str = "stock item";

    fn label(&self) -> String {
        format!("{} @ {}", self.sku, self.warehouse)
    }
}

pub fn demo_stock_items() -> Vec<StockItem> {
    let item = |id, sku: &str, name: &str, warehouse: &str, quantity, reorder_level, last_counted| StockItem {
        id,
        sku: sku.to_string(),
        name: name.to_string(),
        warehouse: warehouse.to_string(),
        quantity,
        reorder_level,
        last_counted,
    };
    vec![
        item(1, "CHR-001", "Office Chair", "Warehouse A", 48, 10, ymd(2024, 3, 1)),
        item(2, "DSK-014", "Standing Desk", "Warehouse A", 7, 8, ymd(2024, 3, 1)),
        item(3, "MON-027", "27\" Monitor", "Warehouse B", 65, 20, ymd(2024, 2, 26)),
        item(4, "KBD-102", "Mechanical Keyboard", "Warehouse B", 0, 15, ymd(2024, 2, 26)),
        item(5, "CBL-HDMI", "HDMI Cable 2m", "Warehouse B", 320, 100, ymd(2024, 2, 26)),
        item(6, "LMP-009", "Desk Lamp", "Warehouse A", 22, 12, ymd(2024, 3, 1)),
        item(7, "CHR-001", "Office Chair", "Store Front", 4, 5, ymd(2024, 3, 4)),
        item(8, "PRN-330", "Laser Printer", "Warehouse C", 12, 4, ymd(2024, 1, 30)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status() {
        let items = demo_stock_items();
        assert_eq!(items[0].stock_status(), "In stock");
        assert_eq!(items[1].stock_status(), "Low stock");
        assert_eq!(items[3].stock_status(), "Out of stock");
    }

    #[test]
    fn test_reorder_boundary_is_low() {
        let mut item = demo_stock_items()[0].clone();
        item.quantity = item.reorder_level;
        assert!(item.is_low());
    }
}
