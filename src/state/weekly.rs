use crate::state::LoadStatus;
use crate::state::messages::NetworkRequest;
use chrono::Local;
use serde::{Deserialize, Serialize};
use viewership_api::{WeekGroup, WeeklyMetrics, WeeklyPredictions};

pub const WEEKLY_FAILED: &str = "Failed to load weekly predictions.";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WeeklyState {
    pub weeks: Vec<WeekGroup>,
    pub metrics: Option<WeeklyMetrics>,
    /// Index of the expanded week. At most one is open.
    pub open: Option<usize>,
    /// Highlighted week in the list.
    pub cursor: usize,
    /// First game row shown in the open week's table.
    pub games_scroll: u16,
    pub status: LoadStatus,
    pub loaded_at: Option<String>,
}

impl WeeklyState {
    /// Every visit to the tab refetches, unless a fetch is already in flight.
    pub fn needs_load(&self) -> bool {
        !self.status.is_loading()
    }

    pub fn begin_load(&mut self) -> NetworkRequest {
        self.status = LoadStatus::Loading;
        NetworkRequest::LoadWeekly
    }

    pub fn on_loaded(&mut self, weekly: WeeklyPredictions) {
        self.weeks = weekly.weeks;
        self.metrics = weekly.metrics;
        self.open = (!self.weeks.is_empty()).then_some(0);
        self.cursor = 0;
        self.games_scroll = 0;
        self.status = LoadStatus::Loaded;
        self.loaded_at = Some(Local::now().format("%H:%M").to_string());
    }

    pub fn on_failed(&mut self) {
        self.status = LoadStatus::Failed(WEEKLY_FAILED.to_string());
    }

    /// Expand a week, or collapse it when it is already the open one.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.weeks.len() {
            return;
        }
        self.open = if self.open == Some(index) { None } else { Some(index) };
        self.games_scroll = 0;
    }

    pub fn open_week(&self) -> Option<&WeekGroup> {
        self.open.and_then(|i| self.weeks.get(i))
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.weeks.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn scroll_games_down(&mut self, rows: u16) {
        let games = self.open_week().map(|w| w.games.len()).unwrap_or(0);
        let max = games.saturating_sub(1) as u16;
        self.games_scroll = self.games_scroll.saturating_add(rows).min(max);
    }

    pub fn scroll_games_up(&mut self, rows: u16) {
        self.games_scroll = self.games_scroll.saturating_sub(rows);
    }
}
