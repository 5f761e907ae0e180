//! Sales panel: customer orders.

use chrono::{Local, NaiveDate};
use eframe::egui::Ui;

use super::components::{back_button, choice_row, date_row, format_amount, number_row, panel_header, text_row};
use super::crud::{CrudPage, EntityForm, PageContext};
use super::table_view::{RowActions, TableOptions};
use crate::config::UiConfig;
use crate::error::{AppError, Result};
use crate::models::sales::demo_sales_orders;
use crate::models::{OrderStatus, SalesOrder};
use crate::table::{Column, FilterOption, Fixed, RecordId};
use crate::validation;

fn average_line(order: &SalesOrder) -> f64 {
    if order.items == 0 {
        return 0.0;
    }
    order.total / f64::from(order.items)
}

/// Orders match on number or customer; `#24003` looks up a number suffix.
fn order_search(order: &SalesOrder, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    let number = order.order_number.to_lowercase();
    match needle.strip_prefix('#') {
        Some(suffix) => number.ends_with(suffix),
        None => number.contains(&needle) || order.customer.to_lowercase().contains(&needle),
    }
}

pub fn order_columns() -> Vec<Column<SalesOrder>> {
    vec![
        Column::field("Order #", "order_number").sortable().fixed(Fixed::Left).width(90.0),
        Column::field("Customer", "customer").sortable().width(170.0),
        Column::field("Date", "order_date").sortable().width(100.0),
        Column::field("Items", "items").sortable().width(60.0),
        Column::field("Total", "total")
            .render(|o: &SalesOrder| format_amount(o.total))
            .sortable()
            .width(100.0),
        Column::computed("Avg / Item", |o: &SalesOrder| format_amount(average_line(o)))
            .sort_with(|a: &SalesOrder, b: &SalesOrder| average_line(a).total_cmp(&average_line(b)))
            .width(90.0),
        Column::field("Status", "status")
            .filters(OrderStatus::ALL.iter().map(|s| FilterOption::same(s.label())).collect())
            .fixed(Fixed::Right)
            .width(90.0),
    ]
}

pub struct SalesOrderForm {
    order_number: String,
    customer: String,
    order_date: NaiveDate,
    items: String,
    total: String,
    status: OrderStatus,
}

impl Default for SalesOrderForm {
    fn default() -> Self {
        Self {
            order_number: String::new(),
            customer: String::new(),
            order_date: Local::now().date_naive(),
            items: "1".to_string(),
            total: String::new(),
            status: OrderStatus::Draft,
        }
    }
}

impl EntityForm<SalesOrder> for SalesOrderForm {
    fn from_entity(o: &SalesOrder) -> Self {
        Self {
            order_number: o.order_number.clone(),
            customer: o.customer.clone(),
            order_date: o.order_date,
            items: o.items.to_string(),
            total: format!("{:.2}", o.total),
            status: o.status,
        }
    }

    fn build(&self, id: RecordId) -> Result<SalesOrder> {
        let items = validation::count("Items", &self.items)?;
        let items = u32::try_from(items)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| AppError::validation("An order needs at least one item"))?;

        Ok(SalesOrder {
            id,
            order_number: validation::required("Order number", &self.order_number)?.to_uppercase(),
            customer: validation::required("Customer", &self.customer)?,
            order_date: self.order_date,
            items,
            total: validation::non_negative_decimal("Total", &self.total)?,
            status: self.status,
        })
    }

    fn show(&mut self, ui: &mut Ui, read_only: bool) {
        text_row(ui, "Order number", &mut self.order_number, read_only);
        text_row(ui, "Customer", &mut self.customer, read_only);
        date_row(ui, "Order date", "order_date", &mut self.order_date, read_only);
        number_row(ui, "Items", &mut self.items, read_only);
        number_row(ui, "Total", &mut self.total, read_only);
        choice_row(
            ui,
            "Status",
            "order_status",
            &mut self.status,
            &OrderStatus::ALL,
            |s| s.label().to_string(),
            read_only,
        );
    }
}

pub struct SalesPanel {
    orders: CrudPage<SalesOrder, SalesOrderForm>,
}

impl SalesPanel {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            orders: CrudPage::new("Sales Orders", order_columns(), demo_sales_orders())
                .with_layout(config.default_page_size, config.modal_width)
                .with_search(order_search)
                .with_options(
                    TableOptions::new("sales_orders_table")
                        .add_label("New Order")
                        .search_hint("Order number or customer...")
                        .row_actions(RowActions {
                            view: true,
                            edit: true,
                            delete: false,
                        }),
                ),
        }
    }

    pub fn add_order(&mut self) {
        self.orders.open_create();
    }

    pub fn orders(&self) -> &CrudPage<SalesOrder, SalesOrderForm> {
        &self.orders
    }

    /// Show the sales panel.
    ///
    /// Returns `true` if the back button was clicked.
    pub fn show(&mut self, ui: &mut Ui, ctx: &mut PageContext<'_>) -> bool {
        let go_back = back_button(ui);
        panel_header(ui, "Sales Orders");
        self.orders.show(ui, ctx);
        go_back
    }
}
