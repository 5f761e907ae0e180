pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod store;
pub mod table;
pub mod ui;
pub mod validation;

pub use error::{AppError, Result};
