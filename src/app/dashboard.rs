//! Dashboard view: link table, aggregate stats, copy and delete

use super::App;
use crate::api::ApiError;
use crate::theme;
use crate::types::LinkRecord;
use crate::ui::components;
use crate::utils::{format_created_at, truncate_end};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::collections::HashSet;

/// Aggregates shown in the stat cards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LinkStats {
    pub total_links: usize,
    pub total_clicks: u64,
    pub active_links: usize,
    pub average_clicks: u64,
}

impl LinkStats {
    pub fn from_links(links: &[LinkRecord]) -> Self {
        let total_links = links.len();
        let total_clicks: u64 = links.iter().map(|l| l.click_count).sum();
        let average_clicks = if total_links == 0 {
            0
        } else {
            (total_clicks as f64 / total_links as f64).round() as u64
        };
        Self {
            total_links,
            total_clicks,
            active_links: total_links,
            average_clicks,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

/// The displayed list is the last successful fetch minus locally deleted rows
pub(crate) struct DashboardState {
    pub links: Vec<LinkRecord>,
    pub load: LoadState,
    pub pending_delete: Option<String>,
    /// Ids confirmed for deletion in this visit; later fetches never bring them back
    deleted: HashSet<String>,
    generation: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            links: Vec::new(),
            load: LoadState::Loading,
            pending_delete: None,
            deleted: HashSet::new(),
            generation: 0,
        }
    }
}

impl DashboardState {
    /// Fresh view state; fetches started before the reset are ignored
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        };
    }

    /// Returns the generation the reply must carry
    pub fn begin_load(&mut self) -> u64 {
        self.load = LoadState::Loading;
        self.generation
    }

    /// Returns false when the reply was for a view state that no longer exists
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<Vec<LinkRecord>, ApiError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(mut links) => {
                links.retain(|link| !self.deleted.contains(&link.id));
                self.links = links;
                self.load = LoadState::Loaded;
            }
            Err(e) => self.load = LoadState::Failed(e.to_string()),
        }
        true
    }

    pub fn stats(&self) -> LinkStats {
        LinkStats::from_links(&self.links)
    }

    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Closes the prompt and drops the targeted row. Returns the id to delete remotely.
    pub fn confirm_delete(&mut self) -> Option<String> {
        let id = self.pending_delete.take()?;
        self.links.retain(|link| link.id != id);
        self.deleted.insert(id.clone());
        Some(id)
    }

    /// Exact text the Copy action puts on the clipboard for a row
    pub fn short_url_for(&self, id: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.id == id)
            .map(|link| link.short_url.as_str())
    }

    pub fn shows_empty_message(&self) -> bool {
        self.load == LoadState::Loaded && self.links.is_empty()
    }
}

enum RowAction {
    Copy(String),
    Open(String),
    Delete(String),
}

impl App {
    pub(crate) fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        let mut action: Option<RowAction> = None;
        let mut retry = false;

        ui.add_space(24.0);
        ui.label(
            egui::RichText::new("Dashboard")
                .size(theme::FONT_TITLE + 6.0)
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(egui::RichText::new("Manage your shortened links").color(theme::TEXT_MUTED));
        ui.add_space(20.0);

        let stats = self.dashboard.stats();
        ui.horizontal(|ui| {
            let spacing = ui.spacing().item_spacing.x;
            // card_frame adds 16px margin on each side
            let card_w = ((ui.available_width() - spacing * 3.0) / 4.0 - 2.0 * theme::SPACING_XL).max(80.0);
            components::stat_card(ui, "Total Links", stats.total_links, card_w);
            components::stat_card(ui, "Total Clicks", stats.total_clicks, card_w);
            components::stat_card(ui, "Active Links", stats.active_links, card_w);
            components::stat_card(ui, "Avg. Clicks", stats.average_clicks, card_w);
        });
        ui.add_space(20.0);

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Your Links")
                        .size(theme::FONT_HEADING)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let loading = self.dashboard.load == LoadState::Loading;
                    let refresh = ui.add_enabled(
                        !loading,
                        theme::button(format!("{}  Refresh", egui_phosphor::regular::ARROW_CLOCKWISE)),
                    );
                    if refresh.clicked() {
                        retry = true;
                    }
                });
            });
            ui.separator();

            match &self.dashboard.load {
                LoadState::Loading => {
                    ui.add_space(theme::SPACING_XL);
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new("Loading...").color(theme::TEXT_MUTED));
                    });
                    ui.add_space(theme::SPACING_XL);
                }
                LoadState::Failed(message) => {
                    ui.add_space(theme::SPACING_MD);
                    components::error_banner(ui, message);
                    ui.add_space(theme::SPACING_MD);
                    if ui.add(theme::button("Retry")).clicked() {
                        retry = true;
                    }
                }
                LoadState::Loaded => {
                    if !self.dashboard.links.is_empty() {
                        action = links_table(ui, &self.dashboard.links);
                    }
                    if self.dashboard.shows_empty_message() {
                        ui.add_space(24.0);
                        ui.vertical_centered(|ui| {
                            ui.label(egui::RichText::new("No links available.").color(theme::TEXT_MUTED));
                        });
                        ui.add_space(24.0);
                    }
                }
            }
        });

        if retry {
            self.load_links();
        }
        match action {
            Some(RowAction::Copy(id)) => {
                if let Some(short_url) = self.dashboard.short_url_for(&id).map(str::to_owned) {
                    self.copy_to_clipboard(short_url);
                }
            }
            Some(RowAction::Open(url)) => self.open_external(&url),
            Some(RowAction::Delete(id)) => self.dashboard.request_delete(&id),
            None => {}
        }
    }
}

fn links_table(ui: &mut egui::Ui, links: &[LinkRecord]) -> Option<RowAction> {
    let mut action = None;
    let header = |ui: &mut egui::Ui, title: &str| {
        ui.label(
            egui::RichText::new(title)
                .size(theme::FONT_SMALL)
                .strong()
                .color(theme::TEXT_DIM),
        );
    };

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder().at_least(180.0).clip(true))
        .column(Column::auto().at_least(170.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(130.0))
        .header(26.0, |mut row| {
            for title in ["CODE", "ORIGINAL URL", "SHORT URL", "CLICKS", "CREATED", "ACTIONS"] {
                row.col(|ui| header(ui, title));
            }
        })
        .body(|body| {
            body.rows(theme::ROW_HEIGHT, links.len(), |mut row| {
                let link = &links[row.index()];
                row.col(|ui| {
                    ui.label(
                        egui::RichText::new(&link.code)
                            .monospace()
                            .color(theme::ACCENT),
                    );
                });
                row.col(|ui| {
                    ui.label(egui::RichText::new(truncate_end(&link.long_url, 60)).color(theme::TEXT_SECONDARY))
                        .on_hover_text(&link.long_url);
                });
                row.col(|ui| {
                    let shown = truncate_end(&link.short_url, 40);
                    if components::link_label(ui, &shown, &link.short_url, theme::FONT_LABEL).clicked() {
                        action = Some(RowAction::Open(link.short_url.clone()));
                    }
                });
                row.col(|ui| {
                    ui.label(link.click_count.to_string());
                });
                row.col(|ui| {
                    ui.label(
                        egui::RichText::new(format_created_at(&link.created_at))
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_MUTED),
                    );
                });
                row.col(|ui| {
                    if components::text_action(ui, egui_phosphor::regular::COPY, "Copy", theme::ACCENT) {
                        action = Some(RowAction::Copy(link.id.clone()));
                    }
                    ui.label(egui::RichText::new("•").color(theme::TEXT_DIM));
                    if components::text_action(ui, egui_phosphor::regular::TRASH, "Delete", theme::STATUS_ERROR) {
                        action = Some(RowAction::Delete(link.id.clone()));
                    }
                });
            });
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, clicks: u64) -> LinkRecord {
        LinkRecord {
            id: id.into(),
            long_url: format!("https://example.com/{}", id),
            short_url: format!("https://tiny.link/{}", id),
            code: id.into(),
            click_count: clicks,
            created_at: "2024-06-04T12:00:00Z".into(),
        }
    }

    fn loaded(links: Vec<LinkRecord>) -> DashboardState {
        let mut state = DashboardState::default();
        let generation = state.begin_load();
        state.finish_load(generation, Ok(links));
        state
    }

    #[test]
    fn stats_sum_and_round_average() {
        let stats = LinkStats::from_links(&[link("a", 1), link("b", 2), link("c", 2)]);
        assert_eq!(stats.total_links, 3);
        assert_eq!(stats.total_clicks, 5);
        assert_eq!(stats.active_links, 3);
        // 5 / 3 = 1.67
        assert_eq!(stats.average_clicks, 2);
    }

    #[test]
    fn average_half_rounds_up() {
        let stats = LinkStats::from_links(&[link("a", 1), link("b", 2)]);
        assert_eq!(stats.average_clicks, 2);
    }

    #[test]
    fn empty_list_is_all_zero_with_message() {
        let state = loaded(Vec::new());
        assert_eq!(state.stats(), LinkStats::default());
        assert!(state.shows_empty_message());
    }

    #[test]
    fn no_empty_message_while_loading() {
        let state = DashboardState::default();
        assert_eq!(state.load, LoadState::Loading);
        assert!(!state.shows_empty_message());
    }

    #[test]
    fn failed_load_keeps_message() {
        let mut state = DashboardState::default();
        let generation = state.begin_load();
        state.finish_load(generation, Err(ApiError::InvalidResponse));
        assert_eq!(state.load, LoadState::Failed("Invalid response from server".into()));
    }

    #[test]
    fn cancel_leaves_list_unchanged() {
        let mut state = loaded(vec![link("a", 1), link("b", 2)]);
        state.request_delete("a");
        assert_eq!(state.pending_delete.as_deref(), Some("a"));

        state.cancel_delete();
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.links.len(), 2);
    }

    #[test]
    fn confirm_removes_exactly_the_target() {
        let mut state = loaded(vec![link("a", 1), link("b", 2), link("c", 3)]);
        state.request_delete("b");

        assert_eq!(state.confirm_delete().as_deref(), Some("b"));
        assert_eq!(state.pending_delete, None);
        let ids: Vec<&str> = state.links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(state.stats().total_clicks, 4);
    }

    #[test]
    fn confirm_without_pending_does_nothing() {
        let mut state = loaded(vec![link("a", 1)]);
        assert_eq!(state.confirm_delete(), None);
        assert_eq!(state.links.len(), 1);
    }

    #[test]
    fn copy_target_is_the_rows_short_url() {
        let state = loaded(vec![link("a", 1), link("b", 2)]);
        assert_eq!(state.short_url_for("b"), Some("https://tiny.link/b"));
        assert_eq!(state.short_url_for("zzz"), None);
    }

    #[test]
    fn refetch_replaces_list() {
        let mut state = loaded(vec![link("a", 1)]);
        let generation = state.begin_load();
        state.finish_load(generation, Ok(vec![link("x", 9), link("y", 1)]));
        assert_eq!(state.stats().average_clicks, 5);
    }

    #[test]
    fn refresh_in_flight_does_not_restore_deleted_row() {
        let mut state = loaded(vec![link("a", 1), link("b", 2)]);
        let generation = state.begin_load();
        state.request_delete("a");
        state.confirm_delete();

        state.finish_load(generation, Ok(vec![link("a", 1), link("b", 2)]));
        let ids: Vec<&str> = state.links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b"]);
        assert_eq!(state.stats().total_clicks, 2);
    }

    #[test]
    fn load_started_before_reset_is_ignored() {
        let mut state = loaded(vec![link("a", 1)]);
        let old = state.begin_load();
        state.reset();

        assert!(!state.finish_load(old, Ok(vec![link("stale", 7)])));
        assert_eq!(state.load, LoadState::Loading);
        assert!(state.links.is_empty());
    }
}
