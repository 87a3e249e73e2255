use crate::state::app_settings::AppSettings;
use crate::state::messages::NetworkRequest;
use crate::state::view_state::{Action, ViewState};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    #[default]
    Predictor,
    Brands,
    Weekly,
    Model,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: ViewState,
    pub show_logs: bool,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            state: ViewState::default(),
            show_logs: false,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<NetworkRequest> {
        self.state.apply(action)
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) -> Vec<NetworkRequest> {
        self.dispatch(Action::SelectTab(next))
    }

    pub fn exit_help(&mut self) {
        self.state.exit_help();
    }

    pub fn toggle_show_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Predictor form
    // -----------------------------------------------------------------------

    pub fn predictor_focus_next(&mut self) {
        self.state.predictor.focus = self.state.predictor.focus.next();
    }

    pub fn predictor_focus_prev(&mut self) {
        self.state.predictor.focus = self.state.predictor.focus.prev();
    }

    pub fn predictor_cycle(&mut self, forward: bool) {
        let field = self.state.predictor.focus;
        if let Some(value) = self.state.predictor.cycled_option(field, forward) {
            self.dispatch(Action::SetPredictorField(field, value));
        }
    }

    /// Append a typed character to the focused text field. The validator
    /// decides whether it sticks.
    pub fn predictor_type(&mut self, ch: char) {
        let field = self.state.predictor.focus;
        if !field.is_text() {
            return;
        }
        let mut candidate = self.state.predictor.field_text(field);
        candidate.push(ch);
        self.dispatch(Action::SetPredictorField(field, candidate));
    }

    pub fn predictor_backspace(&mut self) {
        let field = self.state.predictor.focus;
        if !field.is_text() {
            return;
        }
        let mut candidate = self.state.predictor.field_text(field);
        if candidate.pop().is_some() {
            self.dispatch(Action::SetPredictorField(field, candidate));
        }
    }

    pub fn predictor_clear(&mut self) {
        let field = self.state.predictor.focus;
        if !self.state.predictor.field_text(field).is_empty() {
            self.dispatch(Action::SetPredictorField(field, String::new()));
        }
    }

    pub fn submit_prediction(&mut self) -> Vec<NetworkRequest> {
        self.dispatch(Action::RequestPrediction)
    }

    // -----------------------------------------------------------------------
    // Brand rankings
    // -----------------------------------------------------------------------

    pub fn brands_cycle_year(&mut self, forward: bool) -> Vec<NetworkRequest> {
        let year = self.state.brands.cycled_year(forward);
        if year == self.state.brands.year {
            return Vec::new();
        }
        self.dispatch(Action::SetBrandYear(year))
    }

    pub fn brands_refresh(&mut self) -> Vec<NetworkRequest> {
        let year = self.state.brands.year;
        self.dispatch(Action::SetBrandYear(year))
    }

    // -----------------------------------------------------------------------
    // Weekly predictions
    // -----------------------------------------------------------------------

    pub fn weekly_toggle_selected(&mut self) {
        let index = self.state.weekly.cursor;
        self.dispatch(Action::ToggleWeek(index));
    }

    pub fn weekly_reload(&mut self) -> Vec<NetworkRequest> {
        if self.state.weekly.status.is_loading() {
            return Vec::new();
        }
        self.dispatch(Action::ReloadWeekly)
    }

    pub fn explanation_scroll_down(&mut self) {
        self.state.explanation_scroll = self.state.explanation_scroll.saturating_add(1);
    }

    pub fn explanation_scroll_up(&mut self) {
        self.state.explanation_scroll = self.state.explanation_scroll.saturating_sub(1);
    }
}
