//! Modal dialogs (delete confirmation)

use super::App;
use crate::theme;
use eframe::egui;

impl App {
    pub(crate) fn render_delete_modal(&mut self, ctx: &egui::Context) {
        if self.dashboard.pending_delete.is_none() {
            return;
        }

        let mut confirm = false;
        let mut cancel = false;

        // Built-in Modal with backdrop, escape-to-close, click-outside handling
        let modal_area = egui::Modal::default_area(egui::Id::new("delete_modal"))
            .default_width(theme::MODAL_WIDTH + theme::SPACING_XL * 2.0);
        let modal = egui::Modal::new(egui::Id::new("delete_modal"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(140))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(theme::MODAL_WIDTH);
            ui.set_max_width(theme::MODAL_WIDTH);

            ui.label(
                egui::RichText::new("Confirm Delete")
                    .size(theme::FONT_HEADING)
                    .strong(),
            );
            ui.add_space(theme::SPACING_SM);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(
                        "Are you sure you want to delete this link? This action cannot be undone.",
                    )
                    .color(theme::TEXT_MUTED),
                )
                .wrap(),
            );
            ui.add_space(theme::SPACING_XL);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(theme::button_danger(format!("{}  Delete", egui_phosphor::regular::TRASH)))
                    .clicked()
                {
                    confirm = true;
                }
                if ui.add(theme::button("Cancel")).clicked() {
                    cancel = true;
                }
            });
        });

        if confirm {
            self.confirm_delete();
        } else if cancel || modal_response.should_close() {
            self.dashboard.cancel_delete();
        }
    }
}
