//! Standard overlay dialog for viewing, creating, and editing a record.
//!
//! The dialog owns its body state. Closing it, by any route, drops that
//! state, so a form reopened later starts from whatever the caller passes to
//! [`Modal::open`]. The wrapper holds no validation or business logic.

use eframe::egui::{self, Align, Layout, RichText, Ui};

use super::components::{primary_button, styled_button};

/// Dialog width unless configured otherwise.
pub const DEFAULT_MODAL_WIDTH: f32 = 800.0;

/// Which footer to render under the body.
#[derive(Debug, Clone, Copy)]
pub enum Footer<'a> {
    /// Cancel and OK buttons.
    OkCancel,
    /// Caller-supplied buttons, left to right.
    Buttons(&'a [&'a str]),
}

/// Result of one frame of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    /// OK pressed; the dialog stays open until the caller closes it.
    Ok,
    /// Cancel pressed; the body has been dropped.
    Cancel,
    /// Dismissed via backdrop, Escape, or the close icon; the body has been dropped.
    Closed,
    /// Custom footer button with this index; the dialog stays open.
    Button(usize),
}

/// Purpose of a record dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    View,
    Create,
    Edit(crate::table::RecordId),
}

impl ModalMode {
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::View)
    }
}

pub struct Modal<T> {
    id: egui::Id,
    title: String,
    width: f32,
    body: Option<T>,
}

impl<T> Modal<T> {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id: egui::Id::new(id_salt),
            title: String::new(),
            width: DEFAULT_MODAL_WIDTH,
            body: None,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.body.is_some()
    }

    /// Show the dialog with fresh body state, replacing any open one.
    pub fn open(&mut self, title: impl Into<String>, body: T) {
        self.title = title.into();
        self.body = Some(body);
    }

    /// Close the dialog, handing back the body it held.
    pub fn close(&mut self) -> Option<T> {
        self.body.take()
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> Option<&mut T> {
        self.body.as_mut()
    }

    /// Render the dialog if open.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        footer: Footer<'_>,
        add_body: impl FnOnce(&mut Ui, &mut T),
    ) -> ModalAction {
        let Some(body) = self.body.as_mut() else {
            return ModalAction::None;
        };

        let title = &self.title;
        let width = self.width;
        let response = egui::Modal::new(self.id).show(ctx, |ui| {
            ui.set_width(width);
            let mut action = ModalAction::None;

            ui.horizontal(|ui| {
                ui.label(RichText::new(title).size(18.0).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button(egui_phosphor::regular::X).clicked() {
                        action = ModalAction::Closed;
                    }
                });
            });
            ui.separator();
            ui.add_space(10.0);

            egui::ScrollArea::vertical()
                .max_height(520.0)
                .show(ui, |ui| add_body(ui, body));

            match footer {
                Footer::OkCancel => {
                    ui.add_space(15.0);
                    ui.separator();
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if styled_button(ui, "Cancel").clicked() {
                            action = ModalAction::Cancel;
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if primary_button(ui, "OK").clicked() {
                                action = ModalAction::Ok;
                            }
                        });
                    });
                }
                Footer::Buttons(labels) => {
                    ui.add_space(15.0);
                    ui.separator();
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        for (i, label) in labels.iter().enumerate() {
                            if styled_button(ui, label).clicked() {
                                action = ModalAction::Button(i);
                            }
                        }
                    });
                }
            }
            action
        });

        let mut action = response.inner;
        if action == ModalAction::None && response.should_close() {
            action = ModalAction::Closed;
        }
        self.settle(action)
    }

    /// Cancel and dismissal drop the body; every other action keeps it.
    fn settle(&mut self, action: ModalAction) -> ModalAction {
        if matches!(action, ModalAction::Cancel | ModalAction::Closed) {
            self.body = None;
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let modal = Modal::<String>::new("m");
        assert!(!modal.is_open());
        assert_eq!(modal.width(), DEFAULT_MODAL_WIDTH);
        assert_eq!(Modal::<String>::new("m").with_width(420.0).width(), 420.0);
    }

    #[test]
    fn test_close_drops_body() {
        let mut modal = Modal::new("m");
        modal.open("Edit", String::from("draft"));
        modal.body_mut().unwrap().push_str(" edited");

        assert_eq!(modal.close().as_deref(), Some("draft edited"));
        assert!(!modal.is_open());
        assert!(modal.body().is_none());
    }

    #[test]
    fn test_open_replaces_body() {
        let mut modal = Modal::new("m");
        modal.open("First", 1);
        modal.open("Second", 2);
        assert_eq!(modal.title(), "Second");
        assert_eq!(modal.body(), Some(&2));
    }

    #[test]
    fn test_show_when_closed_is_noop() {
        let ctx = egui::Context::default();
        let mut modal = Modal::<u8>::new("m");
        let mut action = ModalAction::Ok;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            action = modal.show(ctx, Footer::OkCancel, |_, _| {});
        });
        assert_eq!(action, ModalAction::None);
    }

    fn frame(ctx: &egui::Context, modal: &mut Modal<String>, events: Vec<egui::Event>) -> ModalAction {
        let mut action = ModalAction::None;
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            action = modal.show(ctx, Footer::OkCancel, |ui, body| {
                ui.text_edit_singleline(body);
            });
        });
        action
    }

    #[test]
    fn test_escape_dismisses_and_drops_body() {
        let ctx = egui::Context::default();
        let mut modal = Modal::new("m");
        modal.open("Edit", String::from("draft"));

        assert_eq!(frame(&ctx, &mut modal, Vec::new()), ModalAction::None);
        assert_eq!(modal.body().map(String::as_str), Some("draft"));

        let escape = egui::Event::Key {
            key: egui::Key::Escape,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        assert_eq!(frame(&ctx, &mut modal, vec![escape]), ModalAction::Closed);
        assert!(!modal.is_open());

        modal.open("Edit", String::new());
        assert_eq!(modal.body().map(String::as_str), Some(""));
    }

    #[test]
    fn test_ok_and_custom_buttons_keep_body() {
        let mut modal = Modal::new("m");
        modal.open("Edit", String::from("draft"));

        assert_eq!(modal.settle(ModalAction::Ok), ModalAction::Ok);
        assert!(modal.is_open());
        assert_eq!(modal.settle(ModalAction::Button(1)), ModalAction::Button(1));
        assert_eq!(modal.body().map(String::as_str), Some("draft"));

        assert_eq!(modal.settle(ModalAction::Cancel), ModalAction::Cancel);
        assert!(modal.body().is_none());
    }

    #[test]
    fn test_read_only_mode() {
        assert!(ModalMode::View.is_read_only());
        assert!(!ModalMode::Edit(3).is_read_only());
    }
}
