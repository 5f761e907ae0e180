//! Modal-driven create/view/edit/delete page over one record collection.
//!
//! A page owns its [`RecordStore`], the [`TableState`] that displays it, an
//! editor dialog and a delete confirmation dialog. Every successful mutation
//! goes through the store and then hands the new collection to the table.

use eframe::egui::{self, RichText, Ui};

use super::components::form_error;
use super::modal::{Footer, Modal, ModalAction, ModalMode};
use super::notify::Toasts;
use super::table_view::{self, TableEvent, TableOptions};
use crate::config::ExportConfig;
use crate::error::{AppError, Result};
use crate::export::{self, ExportFormat};
use crate::store::{Entity, RecordStore};
use crate::table::{Column, RecordId, SearchFn, TableState};

/// Editable form state for one entity type.
pub trait EntityForm<E: Entity>: Default {
    /// Pre-fill from an existing record.
    fn from_entity(entity: &E) -> Self;

    /// Validate the fields and produce a record with `id`.
    fn build(&self, id: RecordId) -> Result<E>;

    /// Render the fields.
    fn show(&mut self, ui: &mut Ui, read_only: bool);
}

/// Body of the editor dialog.
pub struct FormSession<F> {
    pub form: F,
    pub mode: ModalMode,
    /// Last validation message, shown under the form.
    pub error: Option<String>,
}

/// Shared services a page needs while handling events.
pub struct PageContext<'a> {
    pub toasts: &'a mut Toasts,
    pub export: &'a ExportConfig,
}

pub struct CrudPage<E: Entity, F> {
    title: String,
    store: RecordStore<E>,
    table: TableState<E>,
    options: TableOptions,
    editor: Modal<FormSession<F>>,
    confirm: Modal<RecordId>,
}

fn capitalize(noun: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<E: Entity, F: EntityForm<E>> CrudPage<E, F> {
    pub fn new(title: impl Into<String>, columns: Vec<Column<E>>, seed: Vec<E>) -> Self {
        let title = title.into();
        let store = RecordStore::new(seed);
        let table = TableState::new(columns, store.records().to_vec());
        let id = title.to_lowercase().replace(' ', "_");
        Self {
            options: TableOptions::new(format!("{id}_table")).add_label(format!("Add {}", capitalize(E::NOUN))),
            editor: Modal::new(format!("{id}_editor")),
            confirm: Modal::new(format!("{id}_confirm")).with_width(420.0),
            title,
            store,
            table,
        }
    }

    /// Apply the configured page size and dialog width.
    pub fn with_layout(mut self, page_size: usize, modal_width: f32) -> Self {
        self.table.set_page_size(page_size);
        self.editor = self.editor.with_width(modal_width);
        self
    }

    /// Show row checkboxes and bulk delete.
    pub fn with_selection(mut self) -> Self {
        self.table = self.table.with_selection();
        self
    }

    /// Match the search box with `matcher` instead of every field.
    pub fn with_search(mut self, matcher: SearchFn<E>) -> Self {
        self.table = self.table.with_search(matcher);
        self
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn store(&self) -> &RecordStore<E> {
        &self.store
    }

    pub fn table(&self) -> &TableState<E> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableState<E> {
        &mut self.table
    }

    pub fn editor(&self) -> Option<&FormSession<F>> {
        self.editor.body()
    }

    pub fn editor_mut(&mut self) -> Option<&mut FormSession<F>> {
        self.editor.body_mut()
    }

    pub fn pending_delete(&self) -> Option<RecordId> {
        self.confirm.body().copied()
    }

    fn sync_table(&mut self) {
        self.table.replace_data(self.store.records().to_vec());
    }

    /// Open an empty form. Fields are reset explicitly on every open.
    pub fn open_create(&mut self) {
        let session = FormSession {
            form: F::default(),
            mode: ModalMode::Create,
            error: None,
        };
        self.editor.open(format!("Add {}", capitalize(E::NOUN)), session);
    }

    pub fn open_edit(&mut self, id: RecordId) -> Result<()> {
        let form = self.prefilled(id)?;
        let session = FormSession {
            form,
            mode: ModalMode::Edit(id),
            error: None,
        };
        self.editor.open(format!("Edit {}", capitalize(E::NOUN)), session);
        Ok(())
    }

    pub fn open_view(&mut self, id: RecordId) -> Result<()> {
        let form = self.prefilled(id)?;
        let session = FormSession {
            form,
            mode: ModalMode::View,
            error: None,
        };
        self.editor.open(format!("{} Details", capitalize(E::NOUN)), session);
        Ok(())
    }

    fn prefilled(&self, id: RecordId) -> Result<F> {
        self.store
            .get(id)
            .map(F::from_entity)
            .ok_or_else(|| AppError::not_found(format!("{} #{id}", E::NOUN)))
    }

    /// Discard the open form.
    pub fn cancel(&mut self) {
        self.editor.close();
    }

    /// Validate and apply the open form.
    ///
    /// Returns `true` when the dialog closed. A validation failure keeps it
    /// open with the message attached to the session.
    pub fn submit(&mut self, toasts: &mut Toasts) -> bool {
        let Some(session) = self.editor.body_mut() else {
            return false;
        };

        let mode = session.mode;
        let id = match mode {
            ModalMode::View => {
                self.editor.close();
                return true;
            }
            ModalMode::Create => self.store.next_id(),
            ModalMode::Edit(id) => id,
        };

        let record = match session.form.build(id) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("{} form rejected: {}", E::NOUN, e);
                session.error = Some(e.to_string());
                return false;
            }
        };

        let label = record.label();
        let outcome = match mode {
            ModalMode::Edit(id) => self.store.update(id, record).map(|()| "updated"),
            _ => {
                self.store.insert(record);
                Ok("created")
            }
        };

        match outcome {
            Ok(verb) => {
                self.sync_table();
                self.editor.close();
                toasts.success(format!("{} '{}' {}", capitalize(E::NOUN), label, verb));
                true
            }
            Err(e) => {
                self.editor.close();
                toasts.error(format!("Failed to save {}: {}", E::NOUN, e));
                true
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: RecordId) {
        if self.store.get(id).is_some() {
            self.confirm.open(format!("Delete {}", capitalize(E::NOUN)), id);
        }
    }

    /// Delete the record awaiting confirmation.
    pub fn confirm_delete(&mut self, toasts: &mut Toasts) -> Option<E> {
        let id = self.confirm.close()?;
        self.delete(id, toasts)
    }

    /// Delete one record subject to its guard.
    ///
    /// A rejection leaves the collection as it was and is reported as a
    /// warning.
    pub fn delete(&mut self, id: RecordId, toasts: &mut Toasts) -> Option<E> {
        match self.store.delete(id) {
            Ok(removed) => {
                self.sync_table();
                toasts.success(format!("{} '{}' deleted", capitalize(E::NOUN), removed.label()));
                Some(removed)
            }
            Err(e) if e.is_warning() => {
                toasts.warning(e.to_string());
                None
            }
            Err(e) => {
                toasts.error(format!("Failed to delete {}: {}", E::NOUN, e));
                None
            }
        }
    }

    /// Delete every selected row, skipping those whose guard rejects.
    pub fn delete_selected(&mut self, toasts: &mut Toasts) -> usize {
        let ids = self.table.selected_ids();
        let mut removed = 0;
        for id in ids {
            if self.delete(id, toasts).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Write the visible rows to a file.
    pub fn export(&self, format: ExportFormat, ctx: &mut PageContext<'_>) {
        let filename = export::generate_export_filename(&self.title, format);
        let Some(path) = export::resolve_destination(ctx.export, &filename, format) else {
            tracing::debug!("Export of {} cancelled", self.title);
            return;
        };
        self.export_to(format, &path, ctx.toasts);
    }

    pub fn export_to(&self, format: ExportFormat, path: &std::path::Path, toasts: &mut Toasts) {
        match export::export_table(&self.table, &self.title, format, path) {
            Ok(()) => toasts.success(format!("Exported {} row(s) to {}", self.table.visible_len(), path.display())),
            Err(e) => toasts.error(format!("Export failed: {e}")),
        }
    }

    /// React to one table event.
    pub fn handle(&mut self, event: TableEvent, ctx: &mut PageContext<'_>) {
        let result = match event {
            TableEvent::Search(query) => {
                tracing::trace!("{} search: {}", self.title, query);
                Ok(())
            }
            TableEvent::Refresh => {
                self.sync_table();
                ctx.toasts.info(format!("{} refreshed", self.title));
                Ok(())
            }
            TableEvent::ExportCsv => {
                self.export(ExportFormat::Csv, ctx);
                Ok(())
            }
            TableEvent::ExportExcel => {
                self.export(ExportFormat::Excel, ctx);
                Ok(())
            }
            TableEvent::Add => {
                self.open_create();
                Ok(())
            }
            TableEvent::View(id) => self.open_view(id),
            TableEvent::Edit(id) => self.open_edit(id),
            TableEvent::Delete(id) => {
                self.request_delete(id);
                Ok(())
            }
        };
        if let Err(e) = result {
            ctx.toasts.error(e.to_string());
        }
    }

    /// Render the table and any open dialog.
    pub fn show(&mut self, ui: &mut Ui, ctx: &mut PageContext<'_>) {
        if self.table.selection_enabled() {
            let selected = self.table.selected_ids().len();
            if selected > 0 {
                ui.horizontal(|ui| {
                    ui.label(format!("{selected} selected"));
                    if ui.button("Delete selected").clicked() {
                        self.delete_selected(ctx.toasts);
                    }
                    if ui.button("Clear selection").clicked() {
                        self.table.clear_selection();
                    }
                });
                ui.add_space(6.0);
            }
        }

        for event in table_view::show(ui, &mut self.table, &self.options) {
            self.handle(event, ctx);
        }

        self.show_editor(ui.ctx(), ctx);
        self.show_confirm(ui.ctx(), ctx);
    }

    fn show_editor(&mut self, egui_ctx: &egui::Context, ctx: &mut PageContext<'_>) {
        let Some(mode) = self.editor.body().map(|s| s.mode) else {
            return;
        };
        let footer = if mode.is_read_only() {
            Footer::Buttons(&["Close"])
        } else {
            Footer::OkCancel
        };

        let action = self.editor.show(egui_ctx, footer, |ui, session| {
            egui::Grid::new("entity_form")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| session.form.show(ui, session.mode.is_read_only()));
            form_error(ui, session.error.as_deref());
        });

        match action {
            ModalAction::Ok => {
                self.submit(ctx.toasts);
            }
            ModalAction::Button(_) => self.cancel(),
            ModalAction::None | ModalAction::Cancel | ModalAction::Closed => {}
        }
    }

    fn show_confirm(&mut self, egui_ctx: &egui::Context, ctx: &mut PageContext<'_>) {
        let store = &self.store;
        let action = self.confirm.show(egui_ctx, Footer::Buttons(&["Cancel", "Delete"]), |ui, id| {
            let label = store.get(*id).map(Entity::label).unwrap_or_default();
            ui.label(format!("Delete {} '{}'?", E::NOUN, label));
            ui.add_space(6.0);
            ui.label(RichText::new("This cannot be undone.").weak());
        });

        match action {
            ModalAction::Button(1) => {
                self.confirm_delete(ctx.toasts);
            }
            ModalAction::Button(_) => {
                self.confirm.close();
            }
            _ => {}
        }
    }
}
