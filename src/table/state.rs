//! Tabular view state: search, column filters, sorting, pagination, selection.
//!
//! The state owns a copy of the input collection. Every derived view (search
//! result, filtered and sorted rows, current page) is computed from that copy
//! on demand, so the only transitions that matter are the ones exposed here.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::column::Column;
use super::csv;
use super::record::{Record, RecordId};
use super::search;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Choices offered by the page size changer.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Replacement for the default any-field matcher.
///
/// Receives the query exactly as typed; never called for an empty query.
pub type SearchFn<R> = fn(&R, &str) -> bool;

/// Effect of replacing the input collection on the active query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResyncPolicy {
    /// Re-run the current query against the new rows.
    #[default]
    KeepQuery,
    /// Drop the query text together with its result.
    ClearQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// 1-based inclusive row range of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

pub struct TableState<R> {
    columns: Vec<Column<R>>,
    data: Vec<R>,
    query: String,
    /// Indices into `data` that pass the query.
    matched: Vec<usize>,
    search: Option<SearchFn<R>>,
    resync: ResyncPolicy,
    sort: Option<SortState>,
    /// Selected filter values per column index.
    filters: BTreeMap<usize, BTreeSet<String>>,
    page: usize,
    page_size: usize,
    selection: Option<BTreeSet<RecordId>>,
}

impl<R: Record> TableState<R> {
    pub fn new(columns: Vec<Column<R>>, data: Vec<R>) -> Self {
        let matched = (0..data.len()).collect();
        Self {
            columns,
            data,
            query: String::new(),
            matched,
            search: None,
            resync: ResyncPolicy::default(),
            sort: None,
            filters: BTreeMap::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            selection: None,
        }
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.set_page_size(size);
        self
    }

    /// Enable row selection checkboxes.
    pub fn with_selection(mut self) -> Self {
        self.selection = Some(BTreeSet::new());
        self
    }

    /// Decide which rows match the query with `matcher`.
    pub fn with_search(mut self, matcher: SearchFn<R>) -> Self {
        self.search = Some(matcher);
        self.rematch();
        self
    }

    pub fn with_resync_policy(mut self, policy: ResyncPolicy) -> Self {
        self.resync = policy;
        self
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// The full input collection.
    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn record(&self, id: RecordId) -> Option<&R> {
        self.data.iter().find(|r| r.id() == id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn has_custom_search(&self) -> bool {
        self.search.is_some()
    }

    /// Update the query; recomputed on every keystroke.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.rematch();
        self.page = 1;
    }

    /// Clear the query and column filters, showing the full collection again.
    pub fn refresh(&mut self) {
        self.query.clear();
        self.filters.clear();
        self.rematch();
        self.page = 1;
    }

    /// External data replaced: adopt the new collection.
    ///
    /// The query text and the rows it selects never diverge: under
    /// `KeepQuery` the query is re-run, under `ClearQuery` both are dropped.
    /// Selected ids that no longer exist are forgotten and the current page
    /// is clamped to the new page count.
    pub fn replace_data(&mut self, data: Vec<R>) {
        self.data = data;
        if self.resync == ResyncPolicy::ClearQuery {
            self.query.clear();
        }
        self.rematch();

        if let Some(selection) = &mut self.selection {
            let present: BTreeSet<RecordId> = self.data.iter().map(|r| r.id()).collect();
            selection.retain(|id| present.contains(id));
        }
        self.clamp_page();
    }

    fn rematch(&mut self) {
        self.matched = match self.search {
            Some(matcher) if !self.query.is_empty() => (0..self.data.len())
                .filter(|&i| matcher(&self.data[i], &self.query))
                .collect(),
            Some(_) => (0..self.data.len()).collect(),
            None => search::search_indices(&self.data, &self.query),
        };
    }

    // Sorting

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort.filter(|s| self.columns.get(s.column).is_some_and(Column::is_sortable));
        self.page = 1;
    }

    /// Header click: ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, column: usize) {
        if !self.columns.get(column).is_some_and(Column::is_sortable) {
            return;
        }
        let direction = match self.sort {
            Some(SortState {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(SortDirection::Descending),
            Some(SortState {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(SortDirection::Ascending),
        };
        self.set_sort(direction.map(|direction| SortState { column, direction }));
    }

    // Column filters

    pub fn filter_values(&self, column: usize) -> Option<&BTreeSet<String>> {
        self.filters.get(&column)
    }

    pub fn is_filter_active(&self, column: usize) -> bool {
        self.filters.get(&column).is_some_and(|v| !v.is_empty())
    }

    /// Replace the selected values of one column's filter.
    pub fn set_filter<I, S>(&mut self, column: usize, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.columns.get(column).is_some_and(Column::is_filterable) {
            return;
        }
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, values);
        }
        self.page = 1;
    }

    /// Check or uncheck one value in a column's filter menu.
    pub fn toggle_filter_value(&mut self, column: usize, value: &str) {
        let mut values = self.filters.get(&column).cloned().unwrap_or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        self.set_filter(column, values);
    }

    pub fn clear_filter(&mut self, column: usize) {
        self.filters.remove(&column);
        self.page = 1;
    }

    /// Values within one column are OR-combined; columns are AND-combined.
    fn passes_filters(&self, record: &R) -> bool {
        self.filters.iter().all(|(&column, values)| {
            values.is_empty()
                || self
                    .columns
                    .get(column)
                    .is_none_or(|c| values.iter().any(|v| c.matches_filter(v, record)))
        })
    }

    // Derived rows

    /// Indices of searched, filtered, and sorted rows.
    pub fn visible_indices(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .matched
            .iter()
            .copied()
            .filter(|&i| self.passes_filters(&self.data[i]))
            .collect();

        if let Some(sort) = self.sort
            && let Some(column) = self.columns.get(sort.column)
        {
            // `sort_by` is stable: equal keys keep input order.
            rows.sort_by(|&a, &b| {
                let ord = column
                    .compare(&self.data[a], &self.data[b])
                    .unwrap_or(Ordering::Equal);
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible_indices().into_iter().map(|i| &self.data[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible_indices().len()
    }

    // Pagination

    pub fn page(&self) -> usize {
        self.page.min(self.page_count())
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.visible_len().div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        self.page_size = size;
        self.page = 1;
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.page_count());
    }

    pub fn page_indices(&self) -> Vec<usize> {
        let start = (self.page() - 1) * self.page_size;
        self.visible_indices()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    pub fn page_rows(&self) -> Vec<&R> {
        self.page_indices().into_iter().map(|i| &self.data[i]).collect()
    }

    pub fn page_info(&self) -> PageInfo {
        let total = self.visible_len();
        if total == 0 {
            return PageInfo { from: 0, to: 0, total };
        }
        let from = (self.page() - 1) * self.page_size + 1;
        PageInfo {
            from,
            to: (from + self.page_size - 1).min(total),
            total,
        }
    }

    // Selection

    pub fn selection_enabled(&self) -> bool {
        self.selection.is_some()
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selection.as_ref().is_some_and(|s| s.contains(&id))
    }

    pub fn toggle_selected(&mut self, id: RecordId) {
        if let Some(selection) = &mut self.selection
            && !selection.remove(&id)
        {
            selection.insert(id);
        }
    }

    pub fn page_fully_selected(&self) -> bool {
        let rows = self.page_rows();
        !rows.is_empty() && rows.iter().all(|r| self.is_selected(r.id()))
    }

    /// Select or deselect every row on the current page.
    pub fn select_page(&mut self, selected: bool) {
        let ids: Vec<RecordId> = self.page_rows().iter().map(|r| r.id()).collect();
        if let Some(selection) = &mut self.selection {
            for id in ids {
                if selected {
                    selection.insert(id);
                } else {
                    selection.remove(&id);
                }
            }
        }
    }

    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selection
            .as_ref()
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn clear_selection(&mut self) {
        if let Some(selection) = &mut self.selection {
            selection.clear();
        }
    }

    // Export

    /// CSV of the visible rows over the data-mapped columns.
    pub fn to_csv(&self) -> String {
        csv::to_csv(&self.columns, &self.visible_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::FilterOption;
    use crate::table::testing::{Row, sample};

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::field("Name", "name").sortable(),
            Column::field("Amount", "amount")
                .sortable()
                .filters(["10", "20", "30", "40"].into_iter().map(FilterOption::same).collect()),
            Column::computed("Big", |r: &Row| String::from(if r.amount >= 30 { "yes" } else { "no" }))
                .filters(vec![FilterOption::same("yes"), FilterOption::same("no")]),
        ]
    }

    fn table() -> TableState<Row> {
        TableState::new(columns(), sample())
    }

    fn visible_names(state: &TableState<Row>) -> Vec<String> {
        state.visible_rows().iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_scenario_name_amount() {
        let mut state = TableState::new(
            vec![Column::field("Name", "name"), Column::field("Amount", "amount")],
            vec![Row::new(1, "A", 10), Row::new(2, "B", 20)],
        );

        state.set_query("a");
        assert_eq!(visible_names(&state), vec!["A"]);

        state.set_query("20");
        assert_eq!(state.visible_rows(), vec![&Row::new(2, "B", 20)]);

        state.set_query("");
        assert_eq!(state.visible_len(), 2);
    }

    #[test]
    fn test_refresh_restores_everything() {
        let mut state = table();
        state.set_query("an");
        state.set_filter(1, ["20"]);
        assert_eq!(visible_names(&state), vec!["Banana"]);

        state.refresh();
        assert_eq!(state.query(), "");
        assert!(!state.is_filter_active(1));
        assert_eq!(state.visible_len(), sample().len());
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut state = table();
        state.toggle_sort(1);
        // amount 10 rows keep input order: apple, Artichoke, Pear
        assert_eq!(
            visible_names(&state),
            vec!["apple", "Artichoke", "Pear", "Banana", "Carrot", "Date"]
        );

        state.toggle_sort(1);
        assert_eq!(
            visible_names(&state),
            vec!["Date", "Carrot", "Banana", "apple", "Artichoke", "Pear"]
        );

        state.toggle_sort(1);
        assert_eq!(state.sort(), None);
        assert_eq!(visible_names(&state)[0], "Carrot");
    }

    #[test]
    fn test_sort_text_case_insensitive() {
        let mut state = table();
        state.toggle_sort(0);
        assert_eq!(
            visible_names(&state),
            vec!["apple", "Artichoke", "Banana", "Carrot", "Date", "Pear"]
        );
    }

    #[test]
    fn test_unsortable_column_ignored() {
        let mut state = table();
        state.toggle_sort(2);
        assert_eq!(state.sort(), None);
    }

    #[test]
    fn test_filters_or_within_and_across_columns() {
        let mut state = table();
        state.set_filter(1, ["10", "40"]);
        assert_eq!(visible_names(&state), vec!["apple", "Artichoke", "Date", "Pear"]);

        state.set_filter(2, ["yes"]);
        assert_eq!(visible_names(&state), vec!["Date"]);

        state.toggle_filter_value(2, "yes");
        assert!(!state.is_filter_active(2));
        assert_eq!(state.visible_len(), 4);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let mut state = table();
        state.set_query("a");
        state.set_filter(1, ["10"]);
        assert_eq!(visible_names(&state), vec!["apple", "Artichoke", "Pear"]);
    }

    #[test]
    fn test_pagination_defaults_and_ranges() {
        let rows: Vec<Row> = (1..=23).map(|i| Row::new(i, &format!("row{i}"), i64::from(i))).collect();
        let mut state = TableState::new(columns(), rows);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(state.page_count(), 3);
        assert_eq!(state.page_info(), PageInfo { from: 1, to: 10, total: 23 });

        state.set_page(3);
        assert_eq!(state.page_rows().len(), 3);
        assert_eq!(state.page_info(), PageInfo { from: 21, to: 23, total: 23 });

        state.set_page(99);
        assert_eq!(state.page(), 3);

        state.set_page_size(20);
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_count(), 2);
    }

    #[test]
    fn test_page_clamps_when_rows_shrink() {
        let rows: Vec<Row> = (1..=25).map(|i| Row::new(i, "x", 1)).collect();
        let mut state = TableState::new(columns(), rows);
        state.set_page(3);
        state.replace_data((1..=12).map(|i| Row::new(i, "x", 1)).collect());
        assert_eq!(state.page(), 2);
        assert_eq!(state.page_rows().len(), 2);
    }

    #[test]
    fn test_empty_page_info() {
        let state = TableState::new(columns(), Vec::new());
        assert_eq!(state.page_info(), PageInfo { from: 0, to: 0, total: 0 });
        assert_eq!(state.page_count(), 1);
    }

    #[test]
    fn test_replace_data_keeps_query_in_sync() {
        let mut state = table();
        state.set_query("pear");
        assert_eq!(state.visible_len(), 1);

        let mut rows = sample();
        rows.push(Row::new(7, "Prickly pear", 5));
        state.replace_data(rows);

        assert_eq!(state.query(), "pear");
        assert_eq!(visible_names(&state), vec!["Pear", "Prickly pear"]);
    }

    #[test]
    fn test_replace_data_clear_policy() {
        let mut state = table().with_resync_policy(ResyncPolicy::ClearQuery);
        state.set_query("pear");
        state.replace_data(sample());
        assert_eq!(state.query(), "");
        assert_eq!(state.visible_len(), sample().len());
    }

    #[test]
    fn test_custom_search_replaces_default_matcher() {
        let mut state = table().with_search(|r: &Row, q: &str| q.parse::<i64>().is_ok_and(|min| r.amount >= min));
        assert!(state.has_custom_search());
        assert_eq!(state.visible_len(), sample().len());

        state.set_query("pear");
        assert_eq!(state.query(), "pear");
        assert_eq!(state.visible_len(), 0);

        state.set_query("30");
        assert!(state.visible_rows().iter().all(|r| r.amount >= 30));
        assert!(state.visible_len() > 0);

        state.replace_data(vec![Row::new(9, "Quince", 45), Row::new(10, "Lime", 5)]);
        assert_eq!(visible_names(&state), vec!["Quince"]);
    }

    #[test]
    fn test_selection() {
        let mut state = table().with_selection();
        assert!(state.selection_enabled());

        state.toggle_selected(2);
        state.toggle_selected(5);
        assert_eq!(state.selected_ids(), vec![2, 5]);

        state.toggle_selected(2);
        assert_eq!(state.selected_ids(), vec![5]);

        state.select_page(true);
        assert!(state.page_fully_selected());

        state.replace_data(sample().into_iter().filter(|r| r.id != 5).collect());
        assert!(!state.is_selected(5));

        state.clear_selection();
        assert!(state.selected_ids().is_empty());
    }

    #[test]
    fn test_selection_disabled_by_default() {
        let mut state = table();
        state.toggle_selected(1);
        assert!(!state.is_selected(1));
    }

    #[test]
    fn test_csv_follows_visible_rows() {
        let mut state = table();
        state.set_filter(1, ["10"]);
        let csv = state.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), state.visible_len() + 1);
        assert_eq!(lines[0], "Name,Amount");
        assert_eq!(lines[1], "apple,10");
        assert!(lines.iter().all(|l| l.split(',').count() == 2));
    }
}
