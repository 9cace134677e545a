#![windows_subsystem = "windows"]
//! TinyLink - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod constants;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use api::ApiClient;
use app::App;
use constants::*;
use eframe::egui;
use tracing::{error, info, warn};
use types::View;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "tinylink.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tinylink=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

/// Client for the configured base URL, falling back to the default when it is unusable
fn build_api_client(settings: &settings::Settings) -> ApiClient {
    let base_url = settings.effective_api_base_url();
    let timeout = settings.request_timeout();
    match ApiClient::new(&base_url, timeout) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Falling back to default API base URL");
            match ApiClient::new(DEFAULT_API_BASE_URL, timeout) {
                Ok(client) => client,
                Err(e) => {
                    error!(error = %e, "Failed to build HTTP client");
                    panic!("Failed to build HTTP client: {}", e);
                }
            }
        }
    }
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "TinyLink starting");

    let settings = settings::Settings::load(&data_dir);
    let api = build_api_client(&settings);
    info!(base_url = api.base_url(), "Using link service");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to start async runtime");
            panic!("Failed to start async runtime: {}", e);
        }
    };

    // Restore saved window position/size
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1200.0, 820.0)))
        .with_min_inner_size([900.0, 600.0])
        .with_title(WINDOW_TITLE);

    if let Some((rgba, width, height)) = utils::rasterize_icon(64) {
        viewport = viewport.with_icon(std::sync::Arc::new(egui::IconData { rgba, width, height }));
    }

    let needs_center = win_pos.is_none();
    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            App::setup_style(&cc.egui_ctx);
            let mut app = App::new(cc.egui_ctx.clone(), api, runtime, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & LAYOUT SHELL
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        self.poll_events();

        // Navigation bar
        egui::TopBottomPanel::top("nav")
            .exact_height(theme::NAV_HEIGHT)
            .show_separator_line(false)
            .frame(theme::nav_frame())
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(APP_NAME)
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(theme::ACCENT_ALT),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // right_to_left, so iterate in reverse to keep Home first
                        for view in View::ALL.into_iter().rev() {
                            let active = self.view == view;
                            let color = if active { theme::ACCENT } else { theme::TEXT_SECONDARY };
                            let button = egui::Button::new(
                                egui::RichText::new(view.label())
                                    .size(theme::FONT_BODY)
                                    .color(color),
                            )
                            .frame(false);
                            if ui.add(button).clicked() {
                                self.navigate(view);
                            }
                        }
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let width = ui.available_width().min(theme::CONTENT_MAX_WIDTH);
                        let side = ((ui.available_width() - width) / 2.0).max(theme::SPACING_XL);
                        ui.horizontal(|ui| {
                            ui.add_space(side);
                            ui.vertical(|ui| {
                                ui.set_width(width - theme::SPACING_XL);
                                match self.view {
                                    View::Home => self.render_home(ui),
                                    View::Dashboard => self.render_dashboard(ui),
                                }
                                ui.add_space(32.0);
                            });
                        });
                    });
            });

        self.render_delete_modal(ctx);
        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Shutting down, saving settings");
        self.save_settings();
    }
}
