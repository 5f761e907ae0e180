//! Inventory panel: stock levels per warehouse.

use chrono::{Local, NaiveDate};
use eframe::egui::Ui;

use super::components::{back_button, date_row, number_row, panel_header, text_row};
use super::crud::{CrudPage, EntityForm, PageContext};
use crate::config::UiConfig;
use crate::error::Result;
use crate::models::StockItem;
use crate::models::inventory::demo_stock_items;
use crate::table::{Column, FilterOption, Fixed, RecordId};
use crate::validation;

pub fn stock_columns() -> Vec<Column<StockItem>> {
    vec![
        Column::field("SKU", "sku").sortable().fixed(Fixed::Left).width(90.0),
        Column::field("Item", "name").sortable().width(170.0),
        Column::field("Warehouse", "warehouse").sortable().filters(vec![
            FilterOption::same("Warehouse A"),
            FilterOption::same("Warehouse B"),
            FilterOption::same("Warehouse C"),
            FilterOption::same("Store Front"),
        ]),
        Column::field("Quantity", "quantity").sortable().width(80.0),
        Column::field("Reorder At", "reorder_level").width(80.0),
        Column::field("Last Counted", "last_counted").sortable().width(110.0),
        Column::computed("Stock", |s: &StockItem| s.stock_status().to_string())
            .filters(vec![
                FilterOption::same("In stock"),
                FilterOption::same("Low stock"),
                FilterOption::same("Out of stock"),
            ])
            .fixed(Fixed::Right)
            .width(100.0),
    ]
}

pub struct StockItemForm {
    sku: String,
    name: String,
    warehouse: String,
    quantity: String,
    reorder_level: String,
    last_counted: NaiveDate,
}

impl Default for StockItemForm {
    fn default() -> Self {
        Self {
            sku: String::new(),
            name: String::new(),
            warehouse: String::new(),
            quantity: "0".to_string(),
            reorder_level: "0".to_string(),
            last_counted: Local::now().date_naive(),
        }
    }
}

impl EntityForm<StockItem> for StockItemForm {
    fn from_entity(s: &StockItem) -> Self {
        Self {
            sku: s.sku.clone(),
            name: s.name.clone(),
            warehouse: s.warehouse.clone(),
            quantity: s.quantity.to_string(),
            reorder_level: s.reorder_level.to_string(),
            last_counted: s.last_counted,
        }
    }

    fn build(&self, id: RecordId) -> Result<StockItem> {
        Ok(StockItem {
            id,
            sku: validation::required("SKU", &self.sku)?.to_uppercase(),
            name: validation::required("Item", &self.name)?,
            warehouse: validation::required("Warehouse", &self.warehouse)?,
            quantity: validation::count("Quantity", &self.quantity)?,
            reorder_level: validation::count("Reorder level", &self.reorder_level)?,
            last_counted: self.last_counted,
        })
    }

    fn show(&mut self, ui: &mut Ui, read_only: bool) {
        text_row(ui, "SKU", &mut self.sku, read_only);
        text_row(ui, "Item", &mut self.name, read_only);
        text_row(ui, "Warehouse", &mut self.warehouse, read_only);
        number_row(ui, "Quantity", &mut self.quantity, read_only);
        number_row(ui, "Reorder level", &mut self.reorder_level, read_only);
        date_row(ui, "Last counted", "stock_counted", &mut self.last_counted, read_only);
    }
}

pub struct InventoryPanel {
    stock: CrudPage<StockItem, StockItemForm>,
}

impl InventoryPanel {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            stock: CrudPage::new("Stock", stock_columns(), demo_stock_items())
                .with_layout(config.default_page_size, config.modal_width)
                .with_selection(),
        }
    }

    pub fn stock(&self) -> &CrudPage<StockItem, StockItemForm> {
        &self.stock
    }

    /// Show the inventory panel.
    ///
    /// Returns `true` if the back button was clicked.
    pub fn show(&mut self, ui: &mut Ui, ctx: &mut PageContext<'_>) -> bool {
        let go_back = back_button(ui);
        panel_header(ui, "Inventory - Stock Levels");
        self.stock.show(ui, ctx);
        go_back
    }
}
