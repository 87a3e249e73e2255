use crate::state::LoadStatus;
use crate::state::messages::NetworkRequest;
use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};
use viewership_api::{BrandRow, YearFilter};

pub const RANKINGS_FAILED: &str = "Failed to load brand rankings.";
pub const YEARS_FAILED: &str = "Failed to load brand years.";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BrandState {
    pub years: Vec<u16>,
    pub years_status: LoadStatus,
    pub year: YearFilter,
    pub rows: Vec<BrandRow>,
    pub status: LoadStatus,
    /// Sequence number of the latest rankings request. Older responses are dropped.
    pub seq: u64,
    pub loaded_at: Option<String>,
    pub scroll_offset: u16,
}

impl BrandState {
    /// Select a year filter and issue the rankings fetch for it.
    pub fn set_year(&mut self, year: YearFilter) -> NetworkRequest {
        self.year = year;
        self.seq += 1;
        self.status = LoadStatus::Loading;
        self.scroll_offset = 0;
        NetworkRequest::LoadBrandRankings { year, seq: self.seq }
    }

    pub fn on_rows(&mut self, seq: u64, rows: Vec<BrandRow>) {
        if seq != self.seq {
            debug!("dropping brand rankings #{seq}, latest is #{}", self.seq);
            return;
        }
        self.rows = rows;
        self.status = LoadStatus::Loaded;
        self.loaded_at = Some(Local::now().format("%H:%M").to_string());
    }

    pub fn on_rows_failed(&mut self, seq: u64) {
        if seq != self.seq {
            return;
        }
        self.status = LoadStatus::Failed(RANKINGS_FAILED.to_string());
    }

    pub fn on_years(&mut self, years: Vec<u16>) {
        self.years = years;
        self.years_status = LoadStatus::Loaded;
    }

    /// "All Years" first, then the backend's years in the order given.
    pub fn year_options(&self) -> Vec<YearFilter> {
        std::iter::once(YearFilter::All)
            .chain(self.years.iter().copied().map(YearFilter::Year))
            .collect()
    }

    pub fn cycled_year(&self, forward: bool) -> YearFilter {
        let options = self.year_options();
        let len = options.len();
        match options.iter().position(|y| *y == self.year) {
            Some(i) if forward => options[(i + 1) % len],
            Some(i) => options[(i + len - 1) % len],
            None => YearFilter::All,
        }
    }

    pub fn scroll_down(&mut self) {
        let max = self.rows.len().saturating_sub(1) as u16;
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}
