//! Toast notification (bottom-right, 3s visible then fade, paused on hover)

use super::App;
use crate::theme;
use eframe::egui;
use std::time::Instant;

const VISIBLE_SECS: f32 = 3.0;
const FADE_SECS: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Info,
    Error,
}

pub(crate) struct Toast {
    pub message: String,
    pub kind: ToastKind,
    started: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            started: Instant::now(),
        }
    }

    /// Opacity after `elapsed` seconds, `None` once fully faded
    pub fn alpha_at(elapsed: f32) -> Option<f32> {
        if elapsed >= VISIBLE_SECS + FADE_SECS {
            None
        } else if elapsed > VISIBLE_SECS {
            Some((VISIBLE_SECS + FADE_SECS - elapsed) / FADE_SECS)
        } else {
            Some(1.0)
        }
    }

    fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

impl App {
    pub(crate) fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast::new(message, kind));
    }

    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(toast) = &mut self.toast else {
            return;
        };
        let Some(alpha) = Toast::alpha_at(toast.elapsed()) else {
            self.toast = None;
            return;
        };

        let border = match toast.kind {
            ToastKind::Info => theme::ACCENT,
            ToastKind::Error => theme::STATUS_ERROR_BORDER,
        };
        let margin = 16.0;
        let screen = ctx.screen_rect();

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(egui::pos2(screen.right() - margin, screen.bottom() - margin))
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED.gamma_multiply(alpha))
                    .stroke(egui::Stroke::new(1.0, border.gamma_multiply(alpha)))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&toast.message)
                                .color(theme::TEXT_PRIMARY.gamma_multiply(alpha)),
                        );
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            toast.started = Instant::now();
        }
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_visible_before_fade() {
        assert_eq!(Toast::alpha_at(0.0), Some(1.0));
        assert_eq!(Toast::alpha_at(VISIBLE_SECS), Some(1.0));
    }

    #[test]
    fn fades_then_expires() {
        let mid = Toast::alpha_at(VISIBLE_SECS + FADE_SECS / 2.0).unwrap();
        assert!((mid - 0.5).abs() < 1e-4);
        assert_eq!(Toast::alpha_at(VISIBLE_SECS + FADE_SECS), None);
    }
}
