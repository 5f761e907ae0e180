//! GUI panels and application state.

pub mod accounting_panel;
pub mod app;
pub mod components;
pub mod crud;
pub mod dashboard;
pub mod hr_panel;
pub mod inventory_panel;
pub mod modal;
pub mod notify;
pub mod products_panel;
pub mod sales_panel;
pub mod settings_panel;
pub mod table_view;

pub use app::App;
