//! egui rendering of [`TableState`]: toolbar, filter menus, grid, pager.

use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column as GridColumn, TableBuilder};
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, CARET_DOUBLE_LEFT, CARET_DOUBLE_RIGHT, CARET_DOWN, CARET_LEFT, CARET_RIGHT, CARET_UP, EYE,
    FILE_CSV, FILE_XLS, FUNNEL, MAGNIFYING_GLASS, PENCIL, PLUS, TRASH,
};

use super::components::{action_button, danger_action_button, primary_button_with_icon, styled_button_with_icon};
use crate::table::column::display_order;
use crate::table::{PAGE_SIZE_OPTIONS, Record, RecordId, SortDirection, TableState};

/// User intent raised by the table for its owner to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// Query text changed.
    Search(String),
    /// Refresh pressed; the table has already reset itself.
    Refresh,
    ExportCsv,
    ExportExcel,
    Add,
    View(RecordId),
    Edit(RecordId),
    Delete(RecordId),
}

/// Row action buttons to show in the trailing column.
#[derive(Debug, Clone, Copy)]
pub struct RowActions {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl RowActions {
    pub const ALL: Self = Self {
        view: true,
        edit: true,
        delete: true,
    };

    fn any(self) -> bool {
        self.view || self.edit || self.delete
    }
}

/// Presentation options for one table.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Unique id salt for widget state.
    pub id: String,
    pub add_label: Option<String>,
    pub row_actions: RowActions,
    pub search_hint: String,
}

impl TableOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            add_label: None,
            row_actions: RowActions::ALL,
            search_hint: "Search...".to_string(),
        }
    }

    pub fn add_label(mut self, label: impl Into<String>) -> Self {
        self.add_label = Some(label.into());
        self
    }

    pub fn search_hint(mut self, hint: impl Into<String>) -> Self {
        self.search_hint = hint.into();
        self
    }

    pub fn row_actions(mut self, actions: RowActions) -> Self {
        self.row_actions = actions;
        self
    }
}

const ROW_HEIGHT: f32 = 26.0;

/// Render the full table and return the events raised this frame.
pub fn show<R: Record>(ui: &mut Ui, state: &mut TableState<R>, options: &TableOptions) -> Vec<TableEvent> {
    let mut events = Vec::new();

    ui.push_id(&options.id, |ui| {
        show_toolbar(ui, state, options, &mut events);
        ui.add_space(8.0);
        show_filter_bar(ui, state);
        ui.add_space(8.0);
        show_grid(ui, state, options, &mut events);
        ui.add_space(8.0);
        show_pager(ui, state);
    });

    events
}

fn show_toolbar<R: Record>(
    ui: &mut Ui,
    state: &mut TableState<R>,
    options: &TableOptions,
    events: &mut Vec<TableEvent>,
) {
    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        let mut query = state.query().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .desired_width(240.0)
                .hint_text(options.search_hint.as_str()),
        );
        if response.changed() {
            state.set_query(query.clone());
            events.push(TableEvent::Search(query));
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            state.refresh();
            events.push(TableEvent::Refresh);
        }

        if styled_button_with_icon(ui, FILE_CSV, "Export CSV").clicked() {
            events.push(TableEvent::ExportCsv);
        }

        if styled_button_with_icon(ui, FILE_XLS, "Export Excel").clicked() {
            events.push(TableEvent::ExportExcel);
        }

        if let Some(label) = &options.add_label {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if primary_button_with_icon(ui, PLUS, label).clicked() {
                    events.push(TableEvent::Add);
                }
            });
        }
    });
}

/// One menu per filterable column with a checkbox per option.
fn show_filter_bar<R: Record>(ui: &mut Ui, state: &mut TableState<R>) {
    let filterable: Vec<usize> = state
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_filterable())
        .map(|(i, _)| i)
        .collect();
    if filterable.is_empty() {
        return;
    }

    ui.horizontal(|ui| {
        ui.label(RichText::new(FUNNEL).weak());
        for index in filterable {
            let column = &state.columns()[index];
            let title = column.title.clone();
            let choices: Vec<(String, String)> = column
                .filters
                .iter()
                .map(|f| (f.value.clone(), f.label.clone()))
                .collect();

            let active = state.filter_values(index).map_or(0, |v| v.len());
            let button_text = if active > 0 {
                RichText::new(format!("{title} ({active})")).strong()
            } else {
                RichText::new(title)
            };

            ui.menu_button(button_text, |ui| {
                for (value, label) in &choices {
                    let mut checked = state.filter_values(index).is_some_and(|v| v.contains(value));
                    if ui.checkbox(&mut checked, label.as_str()).changed() {
                        state.toggle_filter_value(index, value);
                    }
                }
                ui.separator();
                if ui.button("Reset").clicked() {
                    state.clear_filter(index);
                    ui.close();
                }
            });
        }
    });
}

fn show_grid<R: Record>(ui: &mut Ui, state: &mut TableState<R>, options: &TableOptions, events: &mut Vec<TableEvent>) {
    let order = display_order(state.columns());
    let selection = state.selection_enabled();
    let actions = options.row_actions;

    // Snapshot the page so rows can be drawn while the state is mutated.
    let rows: Vec<(RecordId, Vec<String>)> = state
        .page_rows()
        .iter()
        .map(|r| {
            let cells = order.iter().map(|&i| state.columns()[i].cell_text(r)).collect();
            (r.id(), cells)
        })
        .collect();
    let headers: Vec<(usize, String, bool, Option<f32>)> = order
        .iter()
        .map(|&i| {
            let c = &state.columns()[i];
            (i, c.title.clone(), c.is_sortable(), c.width)
        })
        .collect();
    let sort = state.sort();

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .min_scrolled_height(0.0)
        .max_scroll_height(ROW_HEIGHT * 12.0);

    if selection {
        builder = builder.column(GridColumn::exact(28.0));
    }
    for (_, _, _, width) in &headers {
        builder = builder.column(match width {
            Some(w) => GridColumn::initial(*w).at_least(40.0),
            None => GridColumn::auto().at_least(60.0),
        });
    }
    if actions.any() {
        builder = builder.column(GridColumn::remainder().at_least(90.0));
    }

    let mut page_toggle = None;
    let mut row_toggles = Vec::new();
    let mut sort_click = None;

    builder
        .header(ROW_HEIGHT, |mut header| {
            if selection {
                header.col(|ui| {
                    let mut all = state.page_fully_selected();
                    if ui.checkbox(&mut all, "").changed() {
                        page_toggle = Some(all);
                    }
                });
            }
            for (index, title, sortable, _) in &headers {
                header.col(|ui| {
                    if *sortable {
                        let arrow = match sort {
                            Some(s) if s.column == *index => match s.direction {
                                SortDirection::Ascending => CARET_UP,
                                SortDirection::Descending => CARET_DOWN,
                            },
                            _ => "",
                        };
                        let text = RichText::new(format!("{title} {arrow}")).strong();
                        if ui.add(egui::Label::new(text).sense(egui::Sense::click())).clicked() {
                            sort_click = Some(*index);
                        }
                    } else {
                        ui.strong(title.as_str());
                    }
                });
            }
            if actions.any() {
                header.col(|ui| {
                    ui.strong("Actions");
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let (id, cells) = &rows[row.index()];
                if selection {
                    row.col(|ui| {
                        let mut checked = state.is_selected(*id);
                        if ui.checkbox(&mut checked, "").changed() {
                            row_toggles.push(*id);
                        }
                    });
                }
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell.as_str());
                    });
                }
                if actions.any() {
                    row.col(|ui| {
                        if actions.view && action_button(ui, EYE, "View").clicked() {
                            events.push(TableEvent::View(*id));
                        }
                        if actions.edit && action_button(ui, PENCIL, "Edit").clicked() {
                            events.push(TableEvent::Edit(*id));
                        }
                        if actions.delete && danger_action_button(ui, TRASH, "Delete").clicked() {
                            events.push(TableEvent::Delete(*id));
                        }
                    });
                }
            });
        });

    if rows.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(10.0);
            ui.label(RichText::new("No data").weak());
        });
    }

    if let Some(selected) = page_toggle {
        state.select_page(selected);
    }
    for id in row_toggles {
        state.toggle_selected(id);
    }
    if let Some(index) = sort_click {
        state.toggle_sort(index);
    }
}

fn show_pager<R: Record>(ui: &mut Ui, state: &mut TableState<R>) {
    let info = state.page_info();
    let page = state.page();
    let pages = state.page_count();

    ui.horizontal(|ui| {
        if info.total == 0 {
            ui.label("0 items");
        } else {
            ui.label(format!("{}-{} of {}", info.from, info.to, info.total));
        }
        if state.selection_enabled() {
            let selected = state.selected_ids().len();
            if selected > 0 {
                ui.label(RichText::new(format!("{selected} selected")).weak());
            }
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let mut size = state.page_size();
            egui::ComboBox::from_id_salt("page_size")
                .width(90.0)
                .selected_text(format!("{size} / page"))
                .show_ui(ui, |ui| {
                    for option in PAGE_SIZE_OPTIONS {
                        ui.selectable_value(&mut size, option, format!("{option} / page"));
                    }
                });
            if size != state.page_size() {
                state.set_page_size(size);
            }

            ui.add_space(10.0);

            if ui.add_enabled(page < pages, egui::Button::new(CARET_DOUBLE_RIGHT)).clicked() {
                state.set_page(pages);
            }
            if ui.add_enabled(page < pages, egui::Button::new(CARET_RIGHT)).clicked() {
                state.set_page(page + 1);
            }
            ui.label(format!("Page {page} / {pages}"));
            if ui.add_enabled(page > 1, egui::Button::new(CARET_LEFT)).clicked() {
                state.set_page(page - 1);
            }
            if ui.add_enabled(page > 1, egui::Button::new(CARET_DOUBLE_LEFT)).clicked() {
                state.set_page(1);
            }
        });
    });
}
