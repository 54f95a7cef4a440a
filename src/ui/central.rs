//! Central panel: image, caption, controls and label grid stacked vertically.

use eframe::egui::{self, ScrollArea};

use crate::app::LabelingApp;
use crate::message::Message;
use crate::ui_constants::spacing;

impl LabelingApp {
    /// Build the central panel.
    pub(crate) fn build_central(&mut self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let enabled = self.dialog.is_none();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(spacing::STANDARD);
                        self.build_image_panel(ui);
                    });
                    ui.add_space(spacing::STANDARD);
                    self.build_label_controls(ui, messages);
                    ui.add_space(spacing::STANDARD);
                    self.build_label_grid(ui, messages);
                    ui.add_space(spacing::LARGE);
                });
            });
        });
    }
}
