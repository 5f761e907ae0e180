//! Products panel: the product catalogue.

use eframe::egui::Ui;

use super::components::{back_button, checkbox_row, choice_row, format_amount, number_row, panel_header, text_row};
use super::crud::{CrudPage, EntityForm, PageContext};
use crate::config::UiConfig;
use crate::error::Result;
use crate::models::Product;
use crate::models::products::{CATEGORIES, demo_products};
use crate::table::{Column, FilterOption, Fixed, RecordId};
use crate::validation;

/// Filter value for the price range a product falls in.
fn price_band(price: f64) -> &'static str {
    if price < 50.0 {
        "low"
    } else if price <= 500.0 {
        "mid"
    } else {
        "high"
    }
}

pub fn product_columns() -> Vec<Column<Product>> {
    vec![
        Column::field("SKU", "sku").sortable().fixed(Fixed::Left).width(90.0),
        Column::field("Name", "name").sortable().width(180.0),
        Column::field("Category", "category")
            .sortable()
            .filters(CATEGORIES.iter().map(|c| FilterOption::same(*c)).collect()),
        Column::field("Price", "price")
            .render(|p: &Product| format_amount(p.price))
            .sortable()
            .filters(vec![
                FilterOption::new("low", "Under 50"),
                FilterOption::new("mid", "50 - 500"),
                FilterOption::new("high", "Over 500"),
            ])
            .filter_with(|band, p: &Product| price_band(p.price) == band)
            .width(90.0),
        Column::field("Cost", "cost")
            .render(|p: &Product| format_amount(p.cost))
            .width(90.0),
        Column::computed("Margin", |p: &Product| format!("{:.1}%", p.margin_percent()))
            .sort_with(|a: &Product, b: &Product| a.margin_percent().total_cmp(&b.margin_percent()))
            .width(70.0),
        Column::field("Stock", "stock").sortable().width(70.0),
        Column::field("Active", "active")
            .filters(vec![FilterOption::same("Yes"), FilterOption::same("No")])
            .fixed(Fixed::Right)
            .width(60.0),
    ]
}

pub struct ProductForm {
    sku: String,
    name: String,
    category: &'static str,
    price: String,
    cost: String,
    stock: String,
    active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            sku: String::new(),
            name: String::new(),
            category: CATEGORIES[0],
            price: String::new(),
            cost: String::new(),
            stock: "0".to_string(),
            active: true,
        }
    }
}

impl EntityForm<Product> for ProductForm {
    fn from_entity(p: &Product) -> Self {
        Self {
            sku: p.sku.clone(),
            name: p.name.clone(),
            category: CATEGORIES
                .iter()
                .copied()
                .find(|c| *c == p.category)
                .unwrap_or(CATEGORIES[0]),
            price: format!("{:.2}", p.price),
            cost: format!("{:.2}", p.cost),
            stock: p.stock.to_string(),
            active: p.active,
        }
    }

    fn build(&self, id: RecordId) -> Result<Product> {
        Ok(Product {
            id,
            sku: validation::required("SKU", &self.sku)?.to_uppercase(),
            name: validation::required("Name", &self.name)?,
            category: self.category.to_string(),
            price: validation::non_negative_decimal("Price", &self.price)?,
            cost: validation::non_negative_decimal("Cost", &self.cost)?,
            stock: validation::count("Stock", &self.stock)?,
            active: self.active,
        })
    }

    fn show(&mut self, ui: &mut Ui, read_only: bool) {
        text_row(ui, "SKU", &mut self.sku, read_only);
        text_row(ui, "Name", &mut self.name, read_only);
        choice_row(
            ui,
            "Category",
            "product_category",
            &mut self.category,
            &CATEGORIES,
            |c| c.to_string(),
            read_only,
        );
        number_row(ui, "Price", &mut self.price, read_only);
        number_row(ui, "Cost", &mut self.cost, read_only);
        number_row(ui, "Stock", &mut self.stock, read_only);
        checkbox_row(ui, "Active", &mut self.active, read_only);
    }
}

pub struct ProductsPanel {
    products: CrudPage<Product, ProductForm>,
}

impl ProductsPanel {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            products: CrudPage::new("Products", product_columns(), demo_products())
                .with_layout(config.default_page_size, config.modal_width),
        }
    }

    pub fn add_product(&mut self) {
        self.products.open_create();
    }

    pub fn products(&self) -> &CrudPage<Product, ProductForm> {
        &self.products
    }

    /// Show the products panel.
    ///
    /// Returns `true` if the back button was clicked.
    pub fn show(&mut self, ui: &mut Ui, ctx: &mut PageContext<'_>) -> bool {
        let go_back = back_button(ui);
        panel_header(ui, "Products");
        self.products.show(ui, ctx);
        go_back
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notify::{LogLevel, Toasts};

    fn page() -> CrudPage<Product, ProductForm> {
        ProductsPanel::new(&UiConfig::default()).products
    }

    #[test]
    fn test_stocked_product_delete_is_rejected() {
        let mut page = page();
        let mut toasts = Toasts::new(4);
        page.request_delete(1);
        assert!(page.confirm_delete(&mut toasts).is_none());
        assert_eq!(page.store().len(), 8);
        assert_eq!(toasts.active()[0].level, LogLevel::Warning);
        assert_eq!(
            toasts.active()[0].message,
            "Cannot delete 'Office Chair' while 52 unit(s) are in stock"
        );
    }

    #[test]
    fn test_out_of_stock_product_deleted() {
        let mut page = page();
        let mut toasts = Toasts::new(4);
        page.request_delete(8);
        let removed = page.confirm_delete(&mut toasts).unwrap();
        assert_eq!(removed.name, "Fax Machine");
        assert_eq!(page.store().len(), 7);
    }

    #[test]
    fn test_margin_sort() {
        let mut page = page();
        let margin = page.table().columns().iter().position(|c| c.title == "Margin").unwrap();
        page.table_mut().toggle_sort(margin);
        page.table_mut().toggle_sort(margin);
        assert_eq!(page.table().visible_rows()[0].sku, "CBL-HDMI");
    }

    #[test]
    fn test_category_filter() {
        let mut page = page();
        let category = page.table().columns().iter().position(|c| c.title == "Category").unwrap();
        page.table_mut().set_filter(category, ["Furniture", "Services"]);
        let ids: Vec<_> = page.table().visible_rows().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 7]);
    }

    #[test]
    fn test_price_band_filter() {
        let mut page = page();
        let price = page.table().columns().iter().position(|c| c.title == "Price").unwrap();
        page.table_mut().set_filter(price, ["low", "high"]);
        let ids: Vec<_> = page.table().visible_rows().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 5, 6]);
    }

    #[test]
    fn test_edit_prefills_category() {
        let mut page = page();
        page.open_edit(5).unwrap();
        let form = &page.editor().unwrap().form;
        assert_eq!(form.category, "Accessories");
        assert_eq!(form.price, "14.50");
    }

    #[test]
    fn test_negative_price_rejected() {
        let form = ProductForm {
            sku: "x-1".to_string(),
            name: "Widget".to_string(),
            price: "-1".to_string(),
            cost: "0".to_string(),
            ..Default::default()
        };
        assert_eq!(form.build(1).unwrap_err().to_string(), "Price cannot be negative");
    }
}
