//! Generic tabular view model: records, column descriptors, and view state.
//!
//! Everything here is independent of egui; `ui::table_view` renders it.

pub mod column;
pub mod csv;
pub mod record;
pub mod search;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use column::{Column, FilterOption, Fixed, Sorter};
pub use record::{CellValue, Record, RecordId};
pub use state::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PageInfo, ResyncPolicy, SearchFn, SortDirection, SortState, TableState,
};
