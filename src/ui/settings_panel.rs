//! Settings panel for table, dialog, export, and logging configuration.

use std::path::{Path, PathBuf};

use eframe::egui::{self, RichText};

use super::components::{back_button, colors, panel_header};
use super::notify::Toasts;
use crate::config::{AppConfig, LOG_LEVELS};
use crate::table::PAGE_SIZE_OPTIONS;

/// Editable copy of the configuration.
pub struct SettingsPanel {
    draft: AppConfig,
    export_dir: String,
    log_dir: String,
    modified: bool,
}

impl SettingsPanel {
    pub fn new(config: &AppConfig) -> Self {
        let mut panel = Self {
            draft: AppConfig::default(),
            export_dir: String::new(),
            log_dir: String::new(),
            modified: false,
        };
        panel.load(config);
        panel
    }

    /// Discard edits and start over from `config`.
    pub fn load(&mut self, config: &AppConfig) {
        let path_text = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
        self.export_dir = path_text(&config.export.directory);
        self.log_dir = path_text(&config.logging.directory);
        self.draft = config.clone();
        self.modified = false;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Follow a theme change made outside the panel without marking the draft edited.
    pub fn sync_dark_mode(&mut self, dark_mode: bool) {
        self.draft.ui.dark_mode = dark_mode;
    }

    pub fn draft_mut(&mut self) -> &mut AppConfig {
        self.modified = true;
        &mut self.draft
    }

    /// The draft with directory fields applied; blank means platform default.
    fn resolved_draft(&self) -> AppConfig {
        let dir = |text: &str| {
            let text = text.trim();
            (!text.is_empty()).then(|| PathBuf::from(text))
        };
        let mut config = self.draft.clone();
        config.export.directory = dir(&self.export_dir);
        config.logging.directory = dir(&self.log_dir);
        config
    }

    /// Validate and write the draft; on success it becomes the live config.
    pub fn save(&mut self, live: &mut AppConfig, path: &Path, toasts: &mut Toasts) -> bool {
        let config = self.resolved_draft();
        if let Err(e) = config.validate() {
            toasts.warning(e.to_string());
            return false;
        }
        if let Err(e) = config.save(path) {
            toasts.error(format!("Failed to save settings: {e}"));
            return false;
        }
        *live = config;
        self.modified = false;
        toasts.success(format!("Settings saved to {}", path.display()));
        true
    }

    /// Show the settings panel.
    /// Returns `true` if the back button was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, live: &mut AppConfig, path: &Path, toasts: &mut Toasts) -> bool {
        let go_back = back_button(ui);
        panel_header(ui, "Settings");

        egui::ScrollArea::vertical().show(ui, |ui| {
            // Tables and dialogs
            ui.group(|ui| {
                ui.heading("Tables and Dialogs");
                ui.add_space(5.0);

                egui::Grid::new("ui_settings_grid")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Rows per page:");
                        egui::ComboBox::from_id_salt("settings_page_size")
                            .selected_text(self.draft.ui.default_page_size.to_string())
                            .show_ui(ui, |ui| {
                                for size in PAGE_SIZE_OPTIONS {
                                    if ui
                                        .selectable_value(&mut self.draft.ui.default_page_size, size, size.to_string())
                                        .changed()
                                    {
                                        self.modified = true;
                                    }
                                }
                            });
                        ui.end_row();

                        ui.label("Dialog width:");
                        if ui
                            .add(egui::Slider::new(&mut self.draft.ui.modal_width, 300.0..=2000.0).step_by(10.0))
                            .changed()
                        {
                            self.modified = true;
                        }
                        ui.end_row();

                        ui.label("Notification seconds:");
                        if ui
                            .add(egui::Slider::new(&mut self.draft.ui.toast_seconds, 1..=60))
                            .changed()
                        {
                            self.modified = true;
                        }
                        ui.end_row();

                        ui.label("Theme:");
                        if ui.checkbox(&mut self.draft.ui.dark_mode, "Dark mode").changed() {
                            self.modified = true;
                        }
                        ui.end_row();
                    });
                ui.label(RichText::new("Page size and dialog width apply on next start.").small().weak());
            });

            ui.add_space(15.0);

            // Export
            ui.group(|ui| {
                ui.heading("Export");
                ui.add_space(5.0);

                egui::Grid::new("export_settings_grid")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Ask where to save:");
                        if ui.checkbox(&mut self.draft.export.ask_location, "Enable").changed() {
                            self.modified = true;
                        }
                        ui.end_row();

                        ui.label("Export folder:");
                        ui.horizontal(|ui| {
                            if ui
                                .add(
                                    egui::TextEdit::singleline(&mut self.export_dir)
                                        .hint_text("Downloads")
                                        .desired_width(260.0),
                                )
                                .changed()
                            {
                                self.modified = true;
                            }
                            if ui.button("Browse...").clicked()
                                && let Some(dir) = rfd::FileDialog::new().pick_folder()
                            {
                                self.export_dir = dir.display().to_string();
                                self.modified = true;
                            }
                        });
                        ui.end_row();
                    });
            });

            ui.add_space(15.0);

            // Logging
            ui.group(|ui| {
                ui.heading("Logging");
                ui.add_space(5.0);

                egui::Grid::new("log_settings_grid")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Level:");
                        egui::ComboBox::from_id_salt("settings_log_level")
                            .selected_text(self.draft.logging.level.clone())
                            .show_ui(ui, |ui| {
                                for level in LOG_LEVELS {
                                    if ui
                                        .selectable_value(&mut self.draft.logging.level, level.to_string(), level)
                                        .changed()
                                    {
                                        self.modified = true;
                                    }
                                }
                            });
                        ui.end_row();

                        ui.label("Log to file:");
                        if ui.checkbox(&mut self.draft.logging.file_enabled, "Enable").changed() {
                            self.modified = true;
                        }
                        ui.end_row();

                        ui.label("Log folder:");
                        if ui
                            .add(egui::TextEdit::singleline(&mut self.log_dir).desired_width(260.0))
                            .changed()
                        {
                            self.modified = true;
                        }
                        ui.end_row();
                    });
                ui.label(RichText::new("Logging changes apply on next start.").small().weak());
            });

            ui.add_space(20.0);

            // Action buttons
            ui.horizontal(|ui| {
                let save_btn = egui::Button::new("Save Settings");
                if ui.add_enabled(self.modified, save_btn).clicked() {
                    self.save(live, path, toasts);
                }

                if self.modified {
                    ui.label(RichText::new("(unsaved changes)").color(colors::WARNING).italics());
                }

                if ui.button("Reset to Defaults").clicked() {
                    self.load(&AppConfig::default());
                    self.modified = true;
                }
            });
        });

        go_back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_applies_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut live = AppConfig::default();
        let mut toasts = Toasts::new(4);

        let mut panel = SettingsPanel::new(&live);
        panel.draft_mut().ui.default_page_size = 50;
        panel.export_dir = "  /tmp/exports ".to_string();
        assert!(panel.is_modified());

        assert!(panel.save(&mut live, &path, &mut toasts));
        assert!(!panel.is_modified());
        assert_eq!(live.ui.default_page_size, 50);
        assert_eq!(live.export.directory, Some(PathBuf::from("/tmp/exports")));
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_draft_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut live = AppConfig::default();
        let mut toasts = Toasts::new(4);

        let mut panel = SettingsPanel::new(&live);
        panel.draft_mut().ui.default_page_size = 7;

        assert!(!panel.save(&mut live, &path, &mut toasts));
        assert!(panel.is_modified());
        assert_eq!(live.ui.default_page_size, 10);
        assert!(!path.exists());
    }

    #[test]
    fn test_blank_directory_means_default() {
        let mut config = AppConfig::default();
        config.logging.directory = Some(PathBuf::from("/var/log/erp"));
        let mut panel = SettingsPanel::new(&config);
        assert_eq!(panel.log_dir, "/var/log/erp");

        panel.log_dir = "   ".to_string();
        assert_eq!(panel.resolved_draft().logging.directory, None);
    }
}
