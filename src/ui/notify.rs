//! Transient toast notifications and the recent activity log.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Local};
use eframe::egui::{self, Color32, CornerRadius, Margin, RichText};

use super::components::colors;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn color(self) -> Color32 {
        match self {
            LogLevel::Info => Color32::GRAY,
            LogLevel::Success => colors::SUCCESS,
            LogLevel::Warning => colors::WARNING,
            LogLevel::Error => colors::ERROR,
        }
    }
}

/// One notification, kept in the activity log after its toast expires.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

const MAX_HISTORY: usize = 100;

/// Toast queue plus bounded history.
pub struct Toasts {
    active: Vec<LogEntry>,
    history: VecDeque<LogEntry>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(seconds: u64) -> Self {
        Self {
            active: Vec::new(),
            history: VecDeque::new(),
            lifetime: Duration::seconds(seconds as i64),
        }
    }

    /// Push a notification and mirror it to the log.
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        };

        match level {
            LogLevel::Info | LogLevel::Success => tracing::info!("{}", entry.message),
            LogLevel::Warning => tracing::warn!("{}", entry.message),
            LogLevel::Error => tracing::error!("{}", entry.message),
        }

        self.history.push_back(entry.clone());
        // Keep only last 100 messages
        while self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
        self.active.push(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    /// Toasts still on screen.
    pub fn active(&self) -> &[LogEntry] {
        &self.active
    }

    /// Oldest first.
    pub fn history(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drop toasts older than the configured lifetime.
    pub fn prune(&mut self, now: DateTime<Local>) {
        let lifetime = self.lifetime;
        self.active.retain(|t| now - t.timestamp < lifetime);
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.active.len() {
            self.active.remove(index);
        }
    }

    /// Render active toasts in the bottom-right corner.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Local::now());
        if self.active.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (i, toast) in self.active.iter().enumerate() {
                    egui::Frame::new()
                        .fill(ui.visuals().extreme_bg_color)
                        .stroke(egui::Stroke::new(1.0, toast.level.color()))
                        .inner_margin(Margin::same(10))
                        .corner_radius(CornerRadius::same(6))
                        .show(ui, |ui| {
                            ui.set_max_width(360.0);
                            ui.horizontal(|ui| {
                                let message = RichText::new(&toast.message).color(toast.level.color());
                                ui.add(egui::Label::new(message).wrap());
                                if ui.small_button(egui_phosphor::regular::X).clicked() {
                                    dismissed = Some(i);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        if let Some(i) = dismissed {
            self.dismiss(i);
        }
        // Wake up again to expire the remaining toasts.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_records_history_and_active() {
        let mut toasts = Toasts::new(4);
        toasts.success("Saved");
        toasts.warning("Blocked");
        assert_eq!(toasts.active().len(), 2);
        assert_eq!(toasts.history().count(), 2);
        assert_eq!(toasts.active()[1].level, LogLevel::Warning);
    }

    #[test]
    fn test_prune_expires_toasts_but_keeps_history() {
        let mut toasts = Toasts::new(4);
        toasts.info("Hello");
        toasts.prune(Local::now() + Duration::seconds(5));
        assert!(toasts.active().is_empty());
        assert_eq!(toasts.history().count(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut toasts = Toasts::new(4);
        for i in 0..150 {
            toasts.info(format!("message {i}"));
        }
        assert_eq!(toasts.history().count(), MAX_HISTORY);
        assert_eq!(toasts.history().next().map(|e| e.message.as_str()), Some("message 50"));
    }

    #[test]
    fn test_dismiss_out_of_range_is_ignored() {
        let mut toasts = Toasts::new(4);
        toasts.error("Oops");
        toasts.dismiss(3);
        assert_eq!(toasts.active().len(), 1);
        toasts.dismiss(0);
        assert!(toasts.active().is_empty());
    }
}
