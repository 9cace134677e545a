//! Submission view: one long URL in, one short URL or one error out

use super::App;
use crate::api::ApiError;
use crate::theme;
use crate::ui::components;
use eframe::egui;
use url::Url;

const PLACEHOLDER: &str = "https://example.com/your-very-long-url-that-needs-shortening";

const SHOWCASE_STATS: [(&str, &str); 4] = [
    ("10M+", "Links Created"),
    ("500K+", "Active Users"),
    ("99.9%", "Uptime"),
    ("24/7", "Support"),
];

/// Same acceptance as a required `type=url` form field: non-blank and absolute.
/// Returns the trimmed value that gets sent.
pub(crate) fn validate_long_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Please enter a URL.".into());
    }
    match Url::parse(trimmed) {
        Ok(_) => Ok(trimmed.to_string()),
        Err(_) => Err("Please enter a valid URL, including the scheme (e.g. https://)".into()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SubmitOutcome {
    Shortened(String),
    Failed(String),
}

#[derive(Default)]
pub(crate) struct SubmitState {
    pub input: String,
    pub in_flight: bool,
    /// Long URL of the last request that went out
    pub submitted: Option<String>,
    pub outcome: Option<SubmitOutcome>,
    /// Bumped on every reset so replies to requests from a discarded view are dropped
    generation: u64,
}

impl SubmitState {
    /// Fresh view state that still rejects replies meant for the old one
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        };
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the URL to send, or `None` when nothing should go out
    /// (already in flight, or the input failed validation).
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.in_flight {
            return None;
        }
        match validate_long_url(&self.input) {
            Ok(url) => {
                self.in_flight = true;
                self.outcome = None;
                self.submitted = Some(url.clone());
                Some(url)
            }
            Err(message) => {
                self.outcome = Some(SubmitOutcome::Failed(message));
                None
            }
        }
    }

    /// Applies a reply. Returns false and changes nothing when the reply
    /// belongs to an earlier generation.
    pub fn finish_submit(&mut self, generation: u64, result: Result<String, ApiError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = false;
        self.outcome = Some(match result {
            Ok(short_url) => SubmitOutcome::Shortened(short_url),
            Err(e) => SubmitOutcome::Failed(e.to_string()),
        });
        true
    }

    pub fn short_url(&self) -> Option<&str> {
        match &self.outcome {
            Some(SubmitOutcome::Shortened(url)) => Some(url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(SubmitOutcome::Failed(message)) => Some(message),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn render_home(&mut self, ui: &mut egui::Ui) {
        let mut submit = false;
        let mut copy: Option<String> = None;
        let mut open: Option<String> = None;

        ui.add_space(32.0);
        ui.vertical_centered(|ui| {
            components::pill(
                ui,
                &format!("{}  Trusted by 10,000+ users worldwide", egui_phosphor::regular::SPARKLE),
                theme::ACCENT,
            );
            ui.add_space(theme::SPACING_LG);
            ui.label(
                egui::RichText::new("Build stronger digital connections")
                    .size(theme::FONT_HERO)
                    .strong()
                    .color(theme::ACCENT),
            );
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(
                    "Use our URL shortener to engage your audience and connect them to the right information.",
                )
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_MUTED),
            );
        });
        ui.add_space(28.0);

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Shorten a long link")
                        .size(theme::FONT_TITLE)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new("Transform your long URLs into short, shareable links in seconds")
                        .color(theme::TEXT_MUTED),
                );
                ui.add_space(theme::SPACING_MD);
                components::pill(
                    ui,
                    "No credit card required \u{2022} Free forever",
                    theme::STATUS_SUCCESS,
                );
            });
            ui.add_space(theme::SPACING_XL);

            let in_flight = self.submit.in_flight;
            ui.horizontal(|ui| {
                let button_w = 190.0;
                let input_w = (ui.available_width() - button_w - theme::SPACING_MD).max(160.0);
                let input = ui.add_sized(
                    [input_w, theme::BUTTON_HEIGHT_LARGE],
                    egui::TextEdit::singleline(&mut self.submit.input)
                        .hint_text(PLACEHOLDER)
                        .font(egui::FontId::proportional(theme::FONT_BODY + 2.0)),
                );
                if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }

                let label = if in_flight {
                    "Shortening...".to_string()
                } else {
                    format!("{}  Get Short Link", egui_phosphor::regular::LINK)
                };
                let button = ui.add_enabled(
                    !in_flight,
                    theme::button_accent(label).min_size(egui::vec2(button_w, theme::BUTTON_HEIGHT_LARGE)),
                );
                if button.clicked() {
                    submit = true;
                }
                if in_flight {
                    ui.spinner();
                }
            });

            if let Some(message) = self.submit.error() {
                ui.add_space(theme::SPACING_LG);
                components::error_banner(ui, message);
            }

            if let Some(short_url) = self.submit.short_url() {
                ui.add_space(theme::SPACING_XL);
                egui::Frame::new()
                    .fill(theme::STATUS_SUCCESS_BG)
                    .stroke(egui::Stroke::new(1.0, theme::STATUS_SUCCESS_BORDER))
                    .corner_radius(theme::RADIUS_LARGE)
                    .inner_margin(egui::Margin::same(theme::SPACING_XL as i8))
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.label(
                            egui::RichText::new(format!(
                                "{}  Your short URL is ready!",
                                egui_phosphor::regular::CHECK_CIRCLE
                            ))
                            .size(theme::FONT_HEADING)
                            .strong()
                            .color(theme::STATUS_SUCCESS),
                        );
                        ui.add_space(theme::SPACING_SM);
                        if components::link_label(ui, short_url, short_url, theme::FONT_HEADING + 2.0).clicked() {
                            open = Some(short_url.to_string());
                        }
                        if let Some(long_url) = &self.submit.submitted {
                            ui.label(
                                egui::RichText::new(format!("This will redirect to: {}", long_url))
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_MUTED),
                            );
                        }
                        ui.add_space(theme::SPACING_MD);
                        ui.horizontal(|ui| {
                            if ui
                                .add(theme::button(format!("{}  Copy Link", egui_phosphor::regular::COPY)))
                                .clicked()
                            {
                                copy = Some(short_url.to_string());
                            }
                            if ui
                                .add(theme::button_accent(format!(
                                    "{}  Test Link",
                                    egui_phosphor::regular::ARROW_SQUARE_OUT
                                )))
                                .clicked()
                            {
                                open = Some(short_url.to_string());
                            }
                        });
                    });
            }
        });

        ui.add_space(36.0);
        ui.columns(SHOWCASE_STATS.len(), |columns| {
            for (col, (value, label)) in columns.iter_mut().zip(SHOWCASE_STATS) {
                col.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(value)
                            .size(theme::FONT_TITLE + 4.0)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    );
                    ui.label(egui::RichText::new(label).color(theme::TEXT_MUTED));
                });
            }
        });
        ui.add_space(theme::SPACING_XL);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Join thousands of marketers, creators, and businesses worldwide")
                    .color(theme::TEXT_DIM),
            );
        });

        if submit {
            self.submit_link();
        }
        if let Some(text) = copy {
            self.copy_to_clipboard(text);
        }
        if let Some(url) = open {
            self.open_external(&url);
        }
    }
}
