//! Image viewer UI component.

use eframe::egui::{self, Frame, RichText, Stroke, Vec2};

use crate::app::LabelingApp;
use crate::ui_constants::text;

impl LabelingApp {
    /// Show the current image at the fixed display size, plus its caption.
    pub(crate) fn build_image_panel(&self, ui: &mut egui::Ui) {
        let side = self.loader.display_size() as f32;
        let size = Vec2::splat(side);

        Frame::none()
            .fill(self.theme.image_panel_fill())
            .stroke(Stroke::new(2.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .inner_margin(4.0)
            .show(ui, |ui| {
                ui.set_min_size(size);
                ui.set_max_size(size);
                ui.centered_and_justified(|ui| {
                    if let Some(texture) = &self.texture {
                        ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                    } else if let Some(error) = &self.image_error {
                        ui.label(
                            RichText::new(format!("Could not load image\n{}", error))
                                .color(self.theme.missing_label_color()),
                        );
                    } else if self.session.is_none() {
                        ui.label(RichText::new("No dataset loaded").size(text::HEADING));
                    } else if self.session.as_ref().is_some_and(|s| s.is_empty()) {
                        ui.label(RichText::new("Dataset has no rows").size(text::HEADING));
                    } else {
                        ui.spinner();
                    }
                });
            });

        if let Some(session) = &self.session {
            ui.label(RichText::new(session.progress()).size(text::BODY));
            if let Some(row) = session.current_row() {
                ui.label(
                    RichText::new(&row.url)
                        .size(text::SMALL)
                        .color(self.theme.secondary_text_color()),
                );
            }
        }
    }
}
