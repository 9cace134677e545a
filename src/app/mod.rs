//! App module - contains the main application state and logic

mod dashboard;
mod modals;
mod submit;
mod toast;

use dashboard::DashboardState;
use submit::SubmitState;
use toast::{Toast, ToastKind};

use crate::api::{ApiClient, ApiError};
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use tracing::{debug, error, info, warn};

/// Completed network call, handed from the runtime back to the UI thread
pub(crate) enum ApiEvent {
    Shortened { generation: u64, result: Result<String, ApiError> },
    LinksLoaded { generation: u64, result: Result<Vec<LinkRecord>, ApiError> },
    Deleted { id: String, result: Result<(), ApiError> },
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) ctx: egui::Context,
    pub(crate) api: ApiClient,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) events_tx: Sender<ApiEvent>,
    pub(crate) events_rx: Receiver<ApiEvent>,
    // Views (each owns its own ephemeral state)
    pub(crate) view: View,
    pub(crate) submit: SubmitState,
    pub(crate) dashboard: DashboardState,
    pub(crate) toast: Option<Toast>,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        ctx: egui::Context,
        api: ApiClient,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            ctx,
            api,
            runtime,
            events_tx,
            events_rx,
            view: View::Home,
            submit: SubmitState::default(),
            dashboard: DashboardState::default(),
            toast: None,
            settings,
            data_dir,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    /// Fonts and visuals; called once from the eframe creation callback
    pub fn setup_style(ctx: &egui::Context) {
        ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        ctx.set_fonts(fonts);

        theme::apply_visuals(ctx);
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    /// Switch views. The target view starts from fresh state; the dashboard fetches on entry.
    pub(crate) fn navigate(&mut self, view: View) {
        if self.view == view {
            return;
        }
        debug!(from = ?self.view, to = ?view, "Navigating");
        self.view = view;
        match view {
            View::Home => self.submit.reset(),
            View::Dashboard => {
                self.dashboard.reset();
                self.load_links();
            }
        }
    }

    fn spawn_request<F>(&self, request: F)
    where
        F: Future<Output = ApiEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let ctx = self.ctx.clone();
        self.runtime.spawn(async move {
            let event = request.await;
            if tx.send(event).is_err() {
                debug!("UI closed before response arrived");
            }
            ctx.request_repaint();
        });
    }

    pub(crate) fn submit_link(&mut self) {
        let Some(long_url) = self.submit.begin_submit() else {
            return;
        };
        info!(long_url = %long_url, "Submitting URL");
        let generation = self.submit.generation();
        let api = self.api.clone();
        self.spawn_request(async move {
            let result = api.create_link(&long_url).await;
            ApiEvent::Shortened { generation, result }
        });
    }

    pub(crate) fn load_links(&mut self) {
        let generation = self.dashboard.begin_load();
        let api = self.api.clone();
        self.spawn_request(async move {
            let result = api.list_links().await;
            ApiEvent::LinksLoaded { generation, result }
        });
    }

    pub(crate) fn confirm_delete(&mut self) {
        let Some(id) = self.dashboard.confirm_delete() else {
            return;
        };
        info!(id = %id, "Deleting link");
        let api = self.api.clone();
        self.spawn_request(async move {
            let result = api.delete_link(&id).await;
            ApiEvent::Deleted { id, result }
        });
    }

    /// Apply every response that finished since the last frame
    pub(crate) fn poll_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                ApiEvent::Shortened { generation, result } => {
                    match &result {
                        Ok(short_url) => info!(short_url = %short_url, "URL shortened"),
                        Err(e) => error!(error = %e, "Error shortening URL"),
                    }
                    if !self.submit.finish_submit(generation, result) {
                        debug!(generation, "Dropping reply for a discarded submission view");
                    }
                }
                ApiEvent::LinksLoaded { generation, result } => {
                    if let Err(e) = &result {
                        error!(error = %e, "Error fetching links");
                    }
                    if !self.dashboard.finish_load(generation, result) {
                        debug!(generation, "Dropping link list for a discarded dashboard view");
                    }
                }
                ApiEvent::Deleted { id, result } => match result {
                    Ok(()) => info!(id = %id, "Link deleted"),
                    Err(e) => {
                        warn!(id = %id, error = %e, "Delete error");
                        self.show_toast(format!("Could not delete link: {}", e), ToastKind::Error);
                    }
                },
            }
        }
    }

    pub(crate) fn copy_to_clipboard(&mut self, text: String) {
        debug!(text = %text, "Copying to clipboard");
        self.ctx.copy_text(text);
        self.show_toast("Copied to clipboard!", ToastKind::Info);
    }

    pub(crate) fn open_external(&self, url: &str) {
        if let Err(e) = open::that(url) {
            warn!(url = %url, error = %e, "Failed to open link");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::dashboard::LoadState;
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn links_router() -> Router {
        Router::new()
            .route(
                "/api/links",
                get(|| async {
                    Json(json!({ "data": [
                        { "_id": "a", "longUrl": "https://a.example", "shortUrl": "https://t/a", "code": "a", "clickCount": 2 },
                        { "_id": "b", "longUrl": "https://b.example", "shortUrl": "https://t/b", "code": "b", "clickCount": 5 }
                    ]}))
                })
                .post(|| async { Json(json!({ "success": true, "shortUrl": "https://t/new" })) }),
            )
            .route(
                "/api/links/{id}",
                delete(|Path(id): Path<String>| async move {
                    if id == "b" {
                        StatusCode::NO_CONTENT
                    } else {
                        StatusCode::NOT_FOUND
                    }
                }),
            )
    }

    fn test_app(router: Router) -> App {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let base = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            format!("http://{}", addr)
        });
        let api = ApiClient::new(&base, Duration::from_secs(5)).unwrap();
        let dir = std::env::temp_dir();
        App::new(egui::Context::default(), api, runtime, Settings::default(), dir)
    }

    fn poll_until(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.poll_events();
            if done(app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("condition not reached in time");
    }

    #[test]
    fn entering_dashboard_fetches_links() {
        let mut app = test_app(links_router());
        app.navigate(View::Dashboard);
        assert_eq!(app.dashboard.load, LoadState::Loading);

        poll_until(&mut app, |app| app.dashboard.load == LoadState::Loaded);
        assert_eq!(app.dashboard.links.len(), 2);
        assert_eq!(app.dashboard.stats().total_clicks, 7);
    }

    #[test]
    fn submit_shows_short_url() {
        let mut app = test_app(links_router());
        app.submit.input = "https://example.com/some/long/path".into();
        app.submit_link();
        assert!(app.submit.in_flight);

        poll_until(&mut app, |app| !app.submit.in_flight);
        assert_eq!(app.submit.short_url(), Some("https://t/new"));
        assert_eq!(app.submit.error(), None);
    }

    #[test]
    fn confirmed_delete_removes_row_even_when_server_refuses() {
        let mut app = test_app(links_router());
        app.navigate(View::Dashboard);
        poll_until(&mut app, |app| app.dashboard.load == LoadState::Loaded);

        app.dashboard.request_delete("a");
        app.confirm_delete();
        assert_eq!(app.dashboard.pending_delete, None);
        assert_eq!(app.dashboard.links.len(), 1);

        poll_until(&mut app, |app| app.toast.is_some());
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(app.dashboard.links[0].id, "b");
    }

    #[test]
    fn navigating_resets_view_state() {
        let mut app = test_app(links_router());
        app.submit.input = "https://example.com".into();
        app.navigate(View::Dashboard);
        app.navigate(View::Home);
        assert!(app.submit.input.is_empty());
    }

    #[test]
    fn reply_from_previous_home_visit_is_not_shown() {
        let shorten = |Json(body): Json<serde_json::Value>| async move {
            let long_url = body["longUrl"].as_str().unwrap_or_default().to_string();
            if long_url.ends_with("first") {
                tokio::time::sleep(Duration::from_millis(300)).await;
                Json(json!({ "success": true, "shortUrl": "https://t/old" }))
            } else {
                tokio::time::sleep(Duration::from_millis(1200)).await;
                Json(json!({ "success": true, "shortUrl": "https://t/new" }))
            }
        };
        let router = Router::new().route(
            "/api/links",
            get(|| async { Json(json!({ "data": [] })) }).post(shorten),
        );
        let mut app = test_app(router);
        app.submit.input = "https://example.com/first".into();
        app.submit_link();

        app.navigate(View::Dashboard);
        app.navigate(View::Home);
        app.submit.input = "https://example.com/second".into();
        app.submit_link();

        // The first reply has arrived by now, the second has not
        let until = Instant::now() + Duration::from_millis(600);
        while Instant::now() < until {
            app.poll_events();
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(app.submit.in_flight);
        assert_eq!(app.submit.short_url(), None);

        poll_until(&mut app, |app| !app.submit.in_flight);
        assert_eq!(app.submit.short_url(), Some("https://t/new"));
        assert_eq!(app.submit.submitted.as_deref(), Some("https://example.com/second"));
    }

    #[test]
    fn copy_shows_confirmation_toast() {
        let mut app = test_app(links_router());
        app.copy_to_clipboard("https://t/a".into());
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Copied to clipboard!")
        );
    }
}
