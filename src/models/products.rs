//! Product catalogue records.

use crate::error::{AppError, Result};
use crate::store::Entity;
use crate::table::{CellValue, Record, RecordId};

pub const CATEGORIES: [&str; 4] = ["Furniture", "Electronics", "Accessories", "Services"];

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: RecordId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub cost: f64,
    pub stock: i64,
    pub active: bool,
}

impl Product {
    /// Gross margin as a percentage of price; zero for free items.
    pub fn margin_percent(&self) -> f64 {
        if self.price <= 0.0 {
            return 0.0;
        }
        (self.price - self.cost) / self.price * 100.0
    }
}

impl Record for Product {
    const FIELDS: &'static [&'static str] = &["sku", "name", "category", "price", "cost", "stock", "active"];

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
            "category" => CellValue::from(&self.category),
            "price" => CellValue::from(self.price),
            "cost" => CellValue::from(self.cost),
            "stock" => CellValue::from(self.stock),
            "active" => CellValue::from(if self.active { "Yes" } else { "No" }),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Product {
    const NOUN: &'static str = "product";

    fn label(&self) -> String {
        self.name.clone()
    }

    fn delete_guard(&self) -> Result<()> {
        if self.stock > 0 {
            return Err(AppError::rejected(format!(
                "Cannot delete '{}' while {} unit(s) are in stock",
                self.name, self.stock
            )));
        }
        Ok(())
    }
}

pub fn demo_products() -> Vec<Product> {
    let product = |id, sku: &str, name: &str, category: &str, price, cost, stock, active| Product {
        id,
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        cost,
        stock,
        active,
    };
    vec![
        product(1, "CHR-001", "Office Chair", "Furniture", 189.0, 92.5, 52, true),
        product(2, "DSK-014", "Standing Desk", "Furniture", 649.0, 380.0, 7, true),
        product(3, "MON-027", "27\" Monitor", "Electronics", 329.0, 241.0, 65, true),
        product(4, "KBD-102", "Mechanical Keyboard", "Electronics", 119.0, 58.0, 0, true),
        product(5, "CBL-HDMI", "HDMI Cable 2m", "Accessories", 14.5, 3.2, 320, true),
        product(6, "LMP-009", "Desk Lamp", "Accessories", 45.0, 19.0, 22, true),
        product(7, "SVC-INST", "On-site Installation", "Services", 90.0, 55.0, 0, true),
        product(8, "FAX-100", "Fax Machine", "Electronics", 99.0, 80.0, 0, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_percent() {
        let chair = &demo_products()[0];
        let expected = (189.0 - 92.5) / 189.0 * 100.0;
        assert!((chair.margin_percent() - expected).abs() < 1e-9);

        let mut free = chair.clone();
        free.price = 0.0;
        assert_eq!(free.margin_percent(), 0.0);
    }

    #[test]
    fn test_stocked_product_cannot_be_deleted() {
        let products = demo_products();
        assert!(products[0].delete_guard().is_err());
        assert!(products[3].delete_guard().is_ok());
    }
}
