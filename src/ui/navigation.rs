//! Bottom navigation row: Previous, Save & Next, Next.

use eframe::egui::{self, Align, Button, Color32, Layout, RichText, Vec2};

use crate::app::LabelingApp;
use crate::message::Message;
use crate::ui_constants::{button, spacing, text};

impl LabelingApp {
    /// Build the navigation panel anchored to the bottom of the window.
    pub(crate) fn build_navigation(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let has_rows = self.session.as_ref().is_some_and(|s| !s.is_empty());
        let enabled = has_rows && self.dialog.is_none();
        let nav_size = Vec2::new(button::NAV_WIDTH, button::HEIGHT);

        egui::TopBottomPanel::bottom("navigation")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(spacing::TIGHT);
                ui.add_enabled_ui(enabled, |ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .add(Button::new(RichText::new("Previous").size(text::BODY)).min_size(nav_size))
                            .clicked()
                        {
                            messages.push(Message::PrevImage);
                        }

                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui
                                .add(Button::new(RichText::new("Next").size(text::BODY)).min_size(nav_size))
                                .clicked()
                            {
                                messages.push(Message::NextImage);
                            }

                            let remaining = ui.available_width();
                            let pad = ((remaining - button::SAVE_WIDTH) / 2.0).max(0.0);
                            ui.add_space(pad);

                            let save = Button::new(
                                RichText::new("Save & Next")
                                    .size(text::BODY)
                                    .strong()
                                    .color(Color32::BLACK),
                            )
                            .fill(self.theme.save_fill())
                            .min_size(Vec2::new(button::SAVE_WIDTH, button::HEIGHT));
                            if ui.add(save).clicked() {
                                messages.push(Message::SaveAndNext);
                            }
                        });
                    });
                });
                ui.add_space(spacing::TIGHT);
            });
    }
}
