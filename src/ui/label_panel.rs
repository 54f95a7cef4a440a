//! Label entry, selection display and the label button grid.

use eframe::egui::{self, Align, Button, Key, Layout, RichText, TextEdit, Vec2};

use crate::app::LabelingApp;
use crate::message::Message;
use crate::ui_constants::{button, input, spacing, text};

impl LabelingApp {
    /// Build the control row: new-label entry on the left, the current
    /// selection and the remove button on the right.
    pub(crate) fn build_label_controls(&mut self, ui: &mut egui::Ui, messages: &mut Vec<Message>) {
        let selected = self
            .session
            .as_ref()
            .and_then(|s| s.selected_label())
            .map(str::to_string);
        let has_session = self.session.is_some();

        ui.horizontal(|ui| {
            let response = ui.add_enabled(
                has_session,
                TextEdit::singleline(&mut self.new_label_text)
                    .hint_text("New label")
                    .font(egui::FontId::proportional(text::BODY))
                    .desired_width(input::NEW_LABEL_WIDTH),
            );
            self.entry_has_focus = response.has_focus();
            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                self.entry_submitted = true;
                messages.push(Message::AddLabel);
            }

            if ui
                .add_enabled(has_session, Button::new(RichText::new("Add Label").size(text::BODY)))
                .clicked()
            {
                messages.push(Message::AddLabel);
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .add_enabled(
                        has_session,
                        Button::new(RichText::new("Remove Selected Label").size(text::BODY)),
                    )
                    .clicked()
                {
                    messages.push(Message::RemoveSelectedLabel);
                }

                let caption = match &selected {
                    Some(name) => RichText::new(format!("Selected Label: {}", name)),
                    None => RichText::new("Selected Label: None")
                        .color(self.theme.missing_label_color()),
                };
                ui.label(caption.size(text::BODY));
            });
        });
    }

    /// Build the grid of label buttons, hotkey-prefixed, selected one highlighted.
    pub(crate) fn build_label_grid(&self, ui: &mut egui::Ui, messages: &mut Vec<Message>) {
        let Some(session) = &self.session else {
            return;
        };
        if session.taxonomy().is_empty() {
            ui.label(
                RichText::new("No labels yet. Type a name above and press Add Label.")
                    .color(self.theme.secondary_text_color()),
            );
            return;
        }

        let columns = self.config.preferences.grid_columns.max(1);
        let selected = session.selected_label();

        egui::Grid::new("label_grid")
            .spacing([spacing::TIGHT, spacing::TIGHT])
            .show(ui, |ui| {
                for (index, name) in session.taxonomy().iter().enumerate() {
                    let caption = self.keybindings.label_caption(index, name);
                    let mut label_button = Button::new(RichText::new(caption).size(text::BODY))
                        .min_size(Vec2::new(button::LABEL_MIN_WIDTH, button::HEIGHT));
                    if selected == Some(name) {
                        label_button = label_button.fill(self.theme.selected_fill());
                    }

                    if ui.add(label_button).clicked() {
                        messages.push(Message::LabelSelected(name.to_string()));
                    }
                    if (index + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });
    }
}
