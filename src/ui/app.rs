//! Main application UI.

use std::path::PathBuf;

use eframe::egui::{self, Align, Layout, RichText};

use crate::config::AppConfig;

use super::accounting_panel::AccountingPanel;
use super::components::colors;
use super::crud::PageContext;
use super::dashboard::{self, DashboardAction};
use super::hr_panel::HrPanel;
use super::inventory_panel::InventoryPanel;
use super::notify::Toasts;
use super::products_panel::ProductsPanel;
use super::sales_panel::SalesPanel;
use super::settings_panel::SettingsPanel;

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Accounting,
    Hr,
    Inventory,
    Products,
    Sales,
    Settings,
}

impl Panel {
    /// Panels reachable from the Modules menu.
    pub const MODULES: [Panel; 5] = [Panel::Accounting, Panel::Hr, Panel::Inventory, Panel::Products, Panel::Sales];

    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Accounting => "Accounting",
            Panel::Hr => "Human Resources",
            Panel::Inventory => "Inventory",
            Panel::Products => "Products",
            Panel::Sales => "Sales",
            Panel::Settings => "Settings",
        }
    }
}

/// Main application state.
pub struct App {
    config: AppConfig,
    config_path: PathBuf,

    // UI navigation
    current_panel: Panel,
    toasts: Toasts,

    // Module panels
    accounting: AccountingPanel,
    hr: HrPanel,
    inventory: InventoryPanel,
    products: ProductsPanel,
    sales: SalesPanel,
    settings: SettingsPanel,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, config_path: PathBuf) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        apply_theme(&cc.egui_ctx, config.ui.dark_mode);
        Self::with_config(config, config_path)
    }

    /// Build the application state without a window.
    pub fn with_config(config: AppConfig, config_path: PathBuf) -> Self {
        tracing::info!(
            "Page size {}, dialog width {}",
            config.ui.default_page_size,
            config.ui.modal_width
        );
        Self {
            current_panel: Panel::default(),
            toasts: Toasts::new(config.ui.toast_seconds),
            accounting: AccountingPanel::new(&config.ui),
            hr: HrPanel::new(&config.ui),
            inventory: InventoryPanel::new(&config.ui),
            products: ProductsPanel::new(&config.ui),
            sales: SalesPanel::new(&config.ui),
            settings: SettingsPanel::new(&config),
            config,
            config_path,
        }
    }

    pub fn current_panel(&self) -> Panel {
        self.current_panel
    }

    /// Switch panels, discarding unsaved settings edits when leaving settings.
    pub fn navigate(&mut self, panel: Panel) {
        let leaving = self.current_panel == Panel::Settings && panel != Panel::Settings;
        let entering = self.current_panel != Panel::Settings && panel == Panel::Settings;
        if (leaving && self.settings.is_modified()) || (entering && !self.settings.is_modified()) {
            self.settings.load(&self.config);
        }
        tracing::debug!("Navigate to {}", panel.name());
        self.current_panel = panel;
    }

    /// Apply a dashboard request.
    pub fn apply(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::Navigate(panel) => self.navigate(panel),
            DashboardAction::QuickAdd(panel) => {
                self.navigate(panel);
                match panel {
                    Panel::Hr => self.hr.add_employee(),
                    Panel::Products => self.products.add_product(),
                    Panel::Sales => self.sales.add_order(),
                    _ => {}
                }
            }
        }
    }

    /// Theme toggle from the View menu; written to the config file right away.
    fn set_dark_mode(&mut self, dark_mode: bool) {
        self.config.ui.dark_mode = dark_mode;
        self.settings.sync_dark_mode(dark_mode);
        match self.config.save(&self.config_path) {
            Ok(()) => tracing::debug!("Dark mode {} saved", if dark_mode { "on" } else { "off" }),
            Err(e) => self.toasts.error(format!("Failed to save settings: {e}")),
        }
    }

    /// Record counts shown in the status bar for the current panel.
    fn status_text(&self) -> Option<String> {
        let text = match self.current_panel {
            Panel::Accounting => format!("{} bank accounts", self.accounting.accounts().store().len()),
            Panel::Hr => format!(
                "{} departments, {} employees, {} bonuses",
                self.hr.departments().store().len(),
                self.hr.employees().store().len(),
                self.hr.bonuses().store().len()
            ),
            Panel::Inventory => format!("{} stock items", self.inventory.stock().store().len()),
            Panel::Products => format!("{} products", self.products.products().store().len()),
            Panel::Sales => format!("{} sales orders", self.sales.orders().store().len()),
            Panel::Dashboard | Panel::Settings => return None,
        };
        Some(text)
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        let mut target = None;
        let mut dark_mode = self.config.ui.dark_mode;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Modules", |ui| {
                    if ui.button("Dashboard").clicked() {
                        target = Some(Panel::Dashboard);
                        ui.close();
                    }
                    ui.separator();
                    for panel in Panel::MODULES {
                        if ui.button(panel.name()).clicked() {
                            target = Some(panel);
                            ui.close();
                        }
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut dark_mode, "Dark mode").changed() {
                        ui.close();
                    }
                });
                ui.menu_button("Settings", |ui| {
                    if ui.button("General").clicked() {
                        target = Some(Panel::Settings);
                        ui.close();
                    }
                });
            });
        });
        if dark_mode != self.config.ui.dark_mode {
            apply_theme(ctx, dark_mode);
            self.set_dark_mode(dark_mode);
        }
        if let Some(panel) = target {
            self.navigate(panel);
        }
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    ui.colored_label(colors::NEUTRAL, self.current_panel.name());
                    if let Some(text) = self.status_text() {
                        ui.separator();
                        ui.label(text);
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(entry) = self.toasts.history().next_back() {
                            ui.label(
                                RichText::new(format!(
                                    "{}  {}",
                                    entry.timestamp.format("%H:%M:%S"),
                                    entry.message
                                ))
                                .color(entry.level.color()),
                            );
                        }
                    });
                });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Menu bar
        self.show_menu_bar(ctx);

        // Status bar
        self.show_status_bar(ctx);

        // Main content
        let mut go_back = false;
        let mut dashboard_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut page = PageContext {
                toasts: &mut self.toasts,
                export: &self.config.export,
            };
            match self.current_panel {
                Panel::Dashboard => dashboard_action = dashboard::show(ui, page.toasts),
                Panel::Accounting => go_back = self.accounting.show(ui, &mut page),
                Panel::Hr => go_back = self.hr.show(ui, &mut page),
                Panel::Inventory => go_back = self.inventory.show(ui, &mut page),
                Panel::Products => go_back = self.products.show(ui, &mut page),
                Panel::Sales => go_back = self.sales.show(ui, &mut page),
                Panel::Settings => {
                    let dark_mode = self.config.ui.dark_mode;
                    go_back = self
                        .settings
                        .show(ui, &mut self.config, &self.config_path, &mut self.toasts);
                    if self.config.ui.dark_mode != dark_mode {
                        apply_theme(ui.ctx(), self.config.ui.dark_mode);
                    }
                }
            }
        });

        if go_back {
            self.navigate(Panel::Dashboard);
        }
        if let Some(action) = dashboard_action {
            self.apply(action);
        }

        // Notifications
        self.toasts.show(ctx);
    }
}

fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    let visuals = if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoadResult;

    fn app() -> App {
        App::with_config(AppConfig::default(), PathBuf::from("config.toml"))
    }

    #[test]
    fn test_starts_on_dashboard() {
        let app = app();
        assert_eq!(app.current_panel(), Panel::Dashboard);
        assert!(app.status_text().is_none());
    }

    #[test]
    fn test_quick_add_opens_create_form() {
        let mut app = app();
        app.apply(DashboardAction::QuickAdd(Panel::Products));
        assert_eq!(app.current_panel(), Panel::Products);
        assert!(app.products.products().editor().is_some());

        app.apply(DashboardAction::QuickAdd(Panel::Hr));
        assert_eq!(app.current_panel(), Panel::Hr);
        assert!(app.hr.employees().editor().is_some());
    }

    #[test]
    fn test_leaving_settings_discards_draft() {
        let mut app = app();
        app.navigate(Panel::Settings);
        app.settings.draft_mut().ui.default_page_size = 50;
        app.navigate(Panel::Dashboard);
        assert!(!app.settings.is_modified());
        assert_eq!(app.config.ui.default_page_size, 10);
    }

    #[test]
    fn test_menu_theme_toggle_survives_settings_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut app = App::with_config(AppConfig::default(), path.clone());

        app.set_dark_mode(true);
        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(saved) => assert!(saved.ui.dark_mode),
            _ => panic!("theme toggle not written"),
        }

        app.navigate(Panel::Settings);
        app.settings.draft_mut().ui.default_page_size = 50;
        assert!(app.settings.save(&mut app.config, &path, &mut app.toasts));
        assert!(app.config.ui.dark_mode);
        assert_eq!(app.config.ui.default_page_size, 50);
    }

    #[test]
    fn test_entering_settings_reloads_live_config() {
        let mut app = app();
        app.config.ui.dark_mode = true;
        app.navigate(Panel::Settings);
        app.settings.draft_mut().ui.toast_seconds = 9;
        assert!(app.settings.draft_mut().ui.dark_mode);
    }

    #[test]
    fn test_status_text_counts_records() {
        let mut app = app();
        app.navigate(Panel::Sales);
        let text = app.status_text().unwrap();
        assert!(text.ends_with("sales orders"));
    }
}
