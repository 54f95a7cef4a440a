//! Top bar UI component.

use eframe::egui::{self, Align, Layout, RichText};

use crate::app::LabelingApp;
use crate::message::Message;
use crate::ui_constants::text;

impl LabelingApp {
    /// Build the top bar with file pickers, theme toggle and progress.
    pub(crate) fn build_topbar(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        egui::TopBottomPanel::top("topbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open dataset…").clicked() {
                    messages.push(Message::OpenDataset);
                }
                if ui.button("Open labels…").clicked() {
                    messages.push(Message::OpenTaxonomy);
                }
                let theme_label = if self.theme.is_dark() { "☀" } else { "🌙" };
                if ui
                    .button(theme_label)
                    .on_hover_text("Toggle dark theme")
                    .clicked()
                {
                    messages.push(Message::ToggleTheme);
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if let Some(session) = &self.session {
                        ui.label(
                            RichText::new(format!(
                                "{}/{} labelled",
                                session.dataset().labeled_count(),
                                session.len()
                            ))
                            .strong(),
                        );
                        ui.label(session.dataset_path().display().to_string());
                    }
                });
            });

            if let Some(status) = &self.status {
                ui.label(
                    RichText::new(status)
                        .size(text::SMALL)
                        .italics()
                        .color(self.theme.secondary_text_color()),
                );
            }
        });
    }
}
