//! Dashboard panel with navigation cards, quick actions, and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{BANK, PACKAGE, SHOPPING_CART, TAG, USERS};

use super::app::Panel;
use super::components::dashboard_card;
use super::notify::Toasts;

/// What the user asked for on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    /// Switch to a module panel.
    Navigate(Panel),
    /// Switch to a module panel and open its create form.
    QuickAdd(Panel),
}

const MODULES: [(Panel, &str, &str, &str); 5] = [
    (Panel::Accounting, "Accounting", "Bank accounts", BANK),
    (Panel::Hr, "Human Resources", "Departments, staff, bonuses", USERS),
    (Panel::Inventory, "Inventory", "Stock by warehouse", PACKAGE),
    (Panel::Products, "Products", "Catalogue and pricing", TAG),
    (Panel::Sales, "Sales", "Customer orders", SHOPPING_CART),
];

/// Show the dashboard panel.
///
/// Returns an action if navigation is requested.
pub fn show(ui: &mut Ui, toasts: &mut Toasts) -> Option<DashboardAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        // Header
        ui.label(RichText::new("ERP Dashboard").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Business administration").size(14.0).weak());

        ui.add_space(30.0);

        // Navigation cards row
        let available = ui.available_width();
        let num_cards = MODULES.len() as f32;
        let spacing = 24.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(140.0, 220.0);
        let card_height = card_width * 0.75;
        let card_size = egui::vec2(card_width, card_height);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);
            for (i, (panel, title, description, icon)) in MODULES.iter().enumerate() {
                if i > 0 {
                    ui.add_space(spacing);
                }
                if dashboard_card(ui, title, description, icon, card_size).clicked() {
                    action = Some(DashboardAction::Navigate(*panel));
                }
            }
        });

        ui.add_space(30.0);
    });

    // Two-column layout: Quick Actions | Recent Activity
    let available_width = ui.available_width();
    let column_width = (available_width - 40.0) / 2.0;

    ui.horizontal(|ui| {
        ui.add_space(10.0);

        // Left column - Quick Actions
        ui.vertical(|ui| {
            ui.set_width(column_width);

            section_frame(ui, column_width, |ui| {
                ui.label(RichText::new("Quick Actions").strong());
                ui.add_space(10.0);

                if ui.button("Add Employee").clicked() {
                    action = Some(DashboardAction::QuickAdd(Panel::Hr));
                }
                ui.add_space(5.0);
                if ui.button("Add Product").clicked() {
                    action = Some(DashboardAction::QuickAdd(Panel::Products));
                }
                ui.add_space(5.0);
                if ui.button("New Sales Order").clicked() {
                    action = Some(DashboardAction::QuickAdd(Panel::Sales));
                }
            });
        });

        ui.add_space(20.0);

        // Right column - Recent Activity
        ui.vertical(|ui| {
            ui.set_width(column_width);

            section_frame(ui, column_width, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Recent Activity").strong());
                    if toasts.history().next().is_some() && ui.small_button("Clear").clicked() {
                        toasts.clear_history();
                    }
                });
                ui.add_space(10.0);

                ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                    if toasts.history().next().is_none() {
                        ui.label(RichText::new("No recent activity").weak());
                    } else {
                        for entry in toasts.history().rev().take(10) {
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                        .small()
                                        .color(Color32::DARK_GRAY),
                                );
                                ui.label(RichText::new(&entry.message).color(entry.level.color()));
                            });
                        }
                    }
                });
            });
        });
    });

    action
}

fn section_frame(ui: &mut Ui, width: f32, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(width - 30.0);
            add_contents(ui);
        });
}
