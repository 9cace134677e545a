//! Reusable UI components
//!
//! Standalone widgets used by both the submission view and the dashboard.

use crate::theme;
use eframe::egui;

/// Card with a small caption above a large number
pub fn stat_card(ui: &mut egui::Ui, label: &str, value: impl ToString, width: f32) {
    theme::card_frame().show(ui, |ui| {
        ui.set_width(width);
        ui.label(
            egui::RichText::new(label)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        );
        ui.label(
            egui::RichText::new(value.to_string())
                .size(theme::FONT_TITLE)
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
    });
}

/// Full-width red box with a warning icon
pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::new()
        .fill(theme::STATUS_ERROR_BG)
        .corner_radius(theme::RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(10))
        .stroke(egui::Stroke::new(1.0, theme::STATUS_ERROR_BORDER))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            let text = format!("{}  {}", egui_phosphor::regular::WARNING_CIRCLE, message);
            ui.add(egui::Label::new(egui::RichText::new(text).color(theme::STATUS_ERROR)).wrap());
        });
}

/// Small rounded badge, sized to its text
pub fn pill(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::new()
        .fill(theme::BG_SURFACE)
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(12, 4))
        .stroke(egui::Stroke::new(1.0, theme::BORDER_DEFAULT))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(theme::FONT_LABEL).color(color));
        });
}

/// Underlined accent text that behaves like a link. Full text shows on hover.
pub fn link_label(ui: &mut egui::Ui, shown: &str, full: &str, size: f32) -> egui::Response {
    let response = ui.add(
        egui::Label::new(
            egui::RichText::new(shown)
                .size(size)
                .underline()
                .color(theme::ACCENT),
        )
        .sense(egui::Sense::click()),
    );
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.on_hover_text(full)
}

/// Borderless text button used for inline row actions (Copy / Delete)
pub fn text_action(ui: &mut egui::Ui, icon: &str, label: &str, color: egui::Color32) -> bool {
    ui.add(
        egui::Button::new(
            egui::RichText::new(format!("{} {}", icon, label))
                .size(theme::FONT_LABEL)
                .color(color),
        )
        .frame(false),
    )
    .clicked()
}
