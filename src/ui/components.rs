//! Shared UI components.

use chrono::NaiveDate;
use eframe::egui::{self, Color32, Response, RichText, Sense, StrokeKind, Ui};

/// Render a clickable dashboard card with dynamic size.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn dashboard_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);

        // Scale factor based on width (200 is the reference size)
        let scale = size.x / 200.0;

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        let icon_pos = egui::pos2(rect.center().x, rect.top() + size.y * 0.23);
        ui.painter().text(
            icon_pos,
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(36.0 * scale),
            visuals.text_color(),
        );

        let title_pos = egui::pos2(rect.center().x, rect.center().y + size.y * 0.07);
        ui.painter().text(
            title_pos,
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(18.0 * scale),
            visuals.text_color(),
        );

        let desc_pos = egui::pos2(rect.center().x, rect.bottom() - size.y * 0.17);
        ui.painter().text(
            desc_pos,
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(12.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(68, 114, 196);
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new(format!("{} Back to Dashboard", egui_phosphor::regular::CARET_LEFT)).size(14.0))
        .clicked()
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Format an amount with two decimals and thousands separators.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Standard toolbar button.
pub fn styled_button(ui: &mut Ui, label: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(label).size(14.0)).min_size(egui::vec2(80.0, 28.0)))
}

/// Standard toolbar button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    styled_button(ui, &format!("{icon} {label}"))
}

/// Filled call-to-action button.
pub fn primary_button(ui: &mut Ui, label: &str) -> Response {
    ui.add(
        egui::Button::new(RichText::new(label).size(14.0).color(Color32::WHITE))
            .fill(colors::PRIMARY)
            .min_size(egui::vec2(80.0, 28.0)),
    )
}

/// Filled call-to-action button with a leading icon.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    primary_button(ui, &format!("{icon} {label}"))
}

/// Compact icon button for table rows.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.small_button(icon).on_hover_text(tooltip)
}

/// Row action button for destructive operations.
pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.small_button(RichText::new(icon).color(colors::ERROR))
        .on_hover_text(tooltip)
}

// Form rows. Each renders a label cell and a value cell inside an `egui::Grid`.

pub fn text_row(ui: &mut Ui, label: &str, value: &mut String, read_only: bool) {
    ui.label(format!("{label}:"));
    ui.add(
        egui::TextEdit::singleline(value)
            .desired_width(280.0)
            .interactive(!read_only),
    );
    ui.end_row();
}

pub fn password_row(ui: &mut Ui, label: &str, value: &mut String, read_only: bool) {
    ui.label(format!("{label}:"));
    ui.add(
        egui::TextEdit::singleline(value)
            .password(true)
            .desired_width(280.0)
            .interactive(!read_only),
    );
    ui.end_row();
}

pub fn number_row(ui: &mut Ui, label: &str, value: &mut String, read_only: bool) {
    ui.label(format!("{label}:"));
    ui.add(
        egui::TextEdit::singleline(value)
            .desired_width(140.0)
            .hint_text("0")
            .interactive(!read_only),
    );
    ui.end_row();
}

pub fn date_row(ui: &mut Ui, label: &str, id_salt: &str, value: &mut NaiveDate, read_only: bool) {
    ui.label(format!("{label}:"));
    if read_only {
        ui.label(value.format("%Y-%m-%d").to_string());
    } else {
        ui.add(egui_extras::DatePickerButton::new(value).id_salt(id_salt));
    }
    ui.end_row();
}

pub fn checkbox_row(ui: &mut Ui, label: &str, value: &mut bool, read_only: bool) {
    ui.label(format!("{label}:"));
    ui.add_enabled(!read_only, egui::Checkbox::without_text(value));
    ui.end_row();
}

/// Dropdown over a fixed set of options.
pub fn choice_row<T: Copy + PartialEq>(
    ui: &mut Ui,
    label: &str,
    id_salt: &str,
    value: &mut T,
    options: &[T],
    option_label: impl Fn(T) -> String,
    read_only: bool,
) {
    ui.label(format!("{label}:"));
    if read_only {
        ui.label(option_label(*value));
    } else {
        egui::ComboBox::from_id_salt(id_salt)
            .width(200.0)
            .selected_text(option_label(*value))
            .show_ui(ui, |ui| {
                for option in options {
                    ui.selectable_value(value, *option, option_label(*option));
                }
            });
    }
    ui.end_row();
}

/// Inline validation message under a form.
pub fn form_error(ui: &mut Ui, error: Option<&str>) {
    if let Some(message) = error {
        ui.add_space(8.0);
        ui.colored_label(colors::ERROR, message);
    }
}
