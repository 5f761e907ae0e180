//! Column descriptors.

use std::cmp::Ordering;

use super::record::Record;

/// Pin a column to one edge of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixed {
    Left,
    Right,
}

/// How a sortable column orders its rows.
pub enum Sorter<R> {
    /// Compare the column's field values.
    Field,
    /// Caller-supplied comparator.
    Custom(fn(&R, &R) -> Ordering),
}

// Manual impls: a derive would demand `R: Copy`.
impl<R> Clone for Sorter<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Sorter<R> {}

/// One selectable value in a column filter menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose label is its value.
    pub fn same(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Describes how one field of a record is displayed, sorted, and filtered.
#[derive(Clone)]
pub struct Column<R> {
    pub title: String,
    /// Backing field key. `None` marks a computed column.
    pub data_index: Option<&'static str>,
    pub render: Option<fn(&R) -> String>,
    pub sorter: Option<Sorter<R>>,
    pub filters: Vec<FilterOption>,
    /// Custom filter predicate; defaults to comparing the field's string form.
    pub on_filter: Option<fn(&str, &R) -> bool>,
    pub fixed: Option<Fixed>,
    pub width: Option<f32>,
}

impl<R: Record> Column<R> {
    /// Column backed by a record field.
    pub fn field(title: impl Into<String>, key: &'static str) -> Self {
        Self {
            title: title.into(),
            data_index: Some(key),
            render: None,
            sorter: None,
            filters: Vec::new(),
            on_filter: None,
            fixed: None,
            width: None,
        }
    }

    /// Column with no backing field; excluded from export.
    pub fn computed(title: impl Into<String>, render: fn(&R) -> String) -> Self {
        Self {
            title: title.into(),
            data_index: None,
            render: Some(render),
            sorter: None,
            filters: Vec::new(),
            on_filter: None,
            fixed: None,
            width: None,
        }
    }

    pub fn render(mut self, render: fn(&R) -> String) -> Self {
        self.render = Some(render);
        self
    }

    /// Sort by the field value.
    pub fn sortable(mut self) -> Self {
        self.sorter = Some(Sorter::Field);
        self
    }

    pub fn sort_with(mut self, compare: fn(&R, &R) -> Ordering) -> Self {
        self.sorter = Some(Sorter::Custom(compare));
        self
    }

    pub fn filters(mut self, options: Vec<FilterOption>) -> Self {
        self.filters = options;
        self
    }

    pub fn filter_with(mut self, predicate: fn(&str, &R) -> bool) -> Self {
        self.on_filter = Some(predicate);
        self
    }

    pub fn fixed(mut self, side: Fixed) -> Self {
        self.fixed = Some(side);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Whether this column maps to a data field.
    pub fn is_data(&self) -> bool {
        self.data_index.is_some()
    }

    pub fn is_sortable(&self) -> bool {
        self.sorter.is_some()
    }

    pub fn is_filterable(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Text shown in the grid cell.
    pub fn cell_text(&self, record: &R) -> String {
        match (self.render, self.data_index) {
            (Some(render), _) => render(record),
            (None, Some(key)) => record.field(key).to_string(),
            (None, None) => String::new(),
        }
    }

    /// Raw field text used by export; empty for computed columns.
    pub fn raw_text(&self, record: &R) -> String {
        self.data_index
            .map(|key| record.field(key).to_string())
            .unwrap_or_default()
    }

    /// Compare two records under this column's sorter.
    ///
    /// Returns `None` when the column is not sortable.
    pub fn compare(&self, a: &R, b: &R) -> Option<Ordering> {
        match self.sorter? {
            Sorter::Custom(compare) => Some(compare(a, b)),
            Sorter::Field => match self.data_index {
                Some(key) => Some(a.field(key).compare(&b.field(key))),
                None => Some(self.cell_text(a).cmp(&self.cell_text(b))),
            },
        }
    }

    /// Whether `record` passes the filter option `value`.
    pub fn matches_filter(&self, value: &str, record: &R) -> bool {
        match (self.on_filter, self.data_index) {
            (Some(predicate), _) => predicate(value, record),
            (None, Some(key)) => record.field(key).to_string() == value,
            (None, None) => self.cell_text(record) == value,
        }
    }
}

/// Grid display order: left-fixed columns, then unpinned, then right-fixed.
pub fn display_order<R>(columns: &[Column<R>]) -> Vec<usize> {
    let pinned = |side: Option<Fixed>| {
        columns
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.fixed == side)
            .map(|(i, _)| i)
    };
    pinned(Some(Fixed::Left))
        .chain(pinned(None))
        .chain(pinned(Some(Fixed::Right)))
        .collect()
}
