//! Modal notices and confirmations.

use eframe::egui::{self, Align2, RichText};

use crate::app::LabelingApp;
use crate::message::Message;
use crate::ui_constants::{spacing, text};

/// A dialog waiting for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Next was pressed on the last row
    LastImage,
    /// Save & Next was pressed with no label selected
    NothingSelected,
    /// Yes/no before removing a label from the taxonomy
    ConfirmRemove(String),
    /// Remove was pressed without a valid selection
    NotInTaxonomy,
    /// The last row was saved
    Finished,
    /// A file or image operation failed
    Error(String),
}

impl Dialog {
    /// Window title.
    pub fn title(&self) -> &'static str {
        match self {
            Dialog::LastImage => "Notice",
            Dialog::NothingSelected => "Warning",
            Dialog::ConfirmRemove(_) => "Remove Label",
            Dialog::NotInTaxonomy | Dialog::Error(_) => "Error",
            Dialog::Finished => "Done",
        }
    }

    /// Body text.
    pub fn text(&self) -> String {
        match self {
            Dialog::LastImage => "This is the last image.".to_string(),
            Dialog::NothingSelected => {
                "No label is selected. Select a label and try again.".to_string()
            }
            Dialog::ConfirmRemove(name) => format!("Remove the label '{}'?", name),
            Dialog::NotInTaxonomy => "The selected label is not in the label list.".to_string(),
            Dialog::Finished => "All images have been labelled.".to_string(),
            Dialog::Error(message) => message.clone(),
        }
    }

    /// Message sent when the operator accepts (button or Enter).
    pub fn accept_message(&self) -> Message {
        match self {
            Dialog::ConfirmRemove(name) => Message::ConfirmRemoveLabel(name.clone()),
            _ => Message::DismissDialog,
        }
    }
}

impl LabelingApp {
    /// Show the open dialog, if any, centered over the window.
    pub(crate) fn build_dialog(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let Some(dialog) = &self.dialog else {
            return;
        };

        egui::Window::new(dialog.title())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(spacing::TIGHT);
                ui.label(RichText::new(dialog.text()).size(text::BODY));
                ui.add_space(spacing::STANDARD);

                ui.horizontal(|ui| match dialog {
                    Dialog::ConfirmRemove(_) => {
                        if ui.button("Yes").clicked() {
                            messages.push(dialog.accept_message());
                        }
                        if ui.button("No").clicked() {
                            messages.push(Message::DismissDialog);
                        }
                    }
                    _ => {
                        if ui.button("OK").clicked() {
                            messages.push(dialog.accept_message());
                        }
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_message() {
        assert_eq!(
            Dialog::ConfirmRemove("cat".to_string()).accept_message(),
            Message::ConfirmRemoveLabel("cat".to_string())
        );
        assert_eq!(Dialog::Finished.accept_message(), Message::DismissDialog);
    }

    #[test]
    fn test_text_mentions_label() {
        assert!(Dialog::ConfirmRemove("cat".to_string()).text().contains("'cat'"));
    }
}
