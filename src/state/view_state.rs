use crate::app::MenuItem;
use crate::state::LoadStatus;
use crate::state::brands::{BrandState, YEARS_FAILED};
use crate::state::messages::NetworkRequest;
use crate::state::predictor::{PredictorField, PredictorState, TEAMS_FAILED};
use crate::state::weekly::WeeklyState;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use viewership_api::{BrandRow, Team, WeeklyPredictions, YearFilter};

/// Everything that can change the view state: user intents and request completions.
#[derive(Debug, Clone)]
pub enum Action {
    SessionStarted,
    SelectTab(MenuItem),
    SetPredictorField(PredictorField, String),
    RequestPrediction,
    SetBrandYear(YearFilter),
    ToggleWeek(usize),
    ReloadWeekly,

    TeamsLoaded(Vec<Team>),
    BrandYearsLoaded(Vec<u16>),
    BrandRankingsLoaded { seq: u64, rows: Vec<BrandRow> },
    PredictionLoaded { revision: u64, formatted: String },
    WeeklyLoaded(WeeklyPredictions),
    RequestFailed { request: NetworkRequest, message: String },
}

/// Session state for all tabs. Plain data, so a snapshot can be serialized
/// and any transition tested without a terminal.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub predictor: PredictorState,
    pub brands: BrandState,
    pub weekly: WeeklyState,
    pub explanation_scroll: u16,
}

impl ViewState {
    /// Apply one action and return the requests it needs issued.
    pub fn apply(&mut self, action: Action) -> Vec<NetworkRequest> {
        match action {
            Action::SessionStarted => {
                self.predictor.teams_status = LoadStatus::Loading;
                self.brands.years_status = LoadStatus::Loading;
                vec![
                    NetworkRequest::LoadTeams,
                    NetworkRequest::LoadBrandYears,
                    self.brands.set_year(YearFilter::All),
                ]
            }
            Action::SelectTab(tab) => self.select_tab(tab),
            Action::SetPredictorField(field, raw) => {
                if !self.predictor.set_field(field, &raw) {
                    debug!("ignored {raw:?} for {field:?}");
                }
                Vec::new()
            }
            Action::RequestPrediction => vec![self.predictor.begin_prediction()],
            Action::SetBrandYear(year) => vec![self.brands.set_year(year)],
            Action::ToggleWeek(index) => {
                self.weekly.toggle(index);
                Vec::new()
            }
            Action::ReloadWeekly => vec![self.weekly.begin_load()],

            Action::TeamsLoaded(teams) => {
                self.predictor.on_teams(teams);
                Vec::new()
            }
            Action::BrandYearsLoaded(years) => {
                self.brands.on_years(years);
                Vec::new()
            }
            Action::BrandRankingsLoaded { seq, rows } => {
                self.brands.on_rows(seq, rows);
                Vec::new()
            }
            Action::PredictionLoaded { revision, formatted } => {
                self.predictor.on_prediction(revision, formatted);
                Vec::new()
            }
            Action::WeeklyLoaded(weekly) => {
                self.weekly.on_loaded(weekly);
                Vec::new()
            }
            Action::RequestFailed { request, message } => {
                error!("request {request:?} failed: {message}");
                self.on_request_failed(request);
                Vec::new()
            }
        }
    }

    fn select_tab(&mut self, next: MenuItem) -> Vec<NetworkRequest> {
        if self.active_tab == next {
            return Vec::new();
        }
        self.previous_tab = self.active_tab;
        self.active_tab = next;

        if next == MenuItem::Weekly && self.weekly.needs_load() {
            return vec![self.weekly.begin_load()];
        }
        Vec::new()
    }

    fn on_request_failed(&mut self, request: NetworkRequest) {
        match request {
            NetworkRequest::LoadTeams => {
                self.predictor.teams_status = LoadStatus::Failed(TEAMS_FAILED.to_string());
            }
            NetworkRequest::LoadBrandYears => {
                self.brands.years_status = LoadStatus::Failed(YEARS_FAILED.to_string());
            }
            NetworkRequest::LoadBrandRankings { seq, .. } => self.brands.on_rows_failed(seq),
            NetworkRequest::Predict { revision, .. } => {
                self.predictor.on_prediction_failed(revision)
            }
            NetworkRequest::LoadWeekly => self.weekly.on_failed(),
        }
    }

    /// Leave the help overlay for whatever tab was active before it.
    pub fn exit_help(&mut self) {
        if self.active_tab == MenuItem::Help {
            self.active_tab = self.previous_tab;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::brands::RANKINGS_FAILED;
    use crate::state::predictor::PREDICTION_FAILED;
    use crate::state::weekly::WEEKLY_FAILED;
    use viewership_api::{PredictionRequest, WeekGroup};

    fn started() -> (ViewState, Vec<NetworkRequest>) {
        let mut state = ViewState::default();
        let requests = state.apply(Action::SessionStarted);
        (state, requests)
    }

    #[test]
    fn session_start_loads_reference_data_and_all_year_rankings() {
        let (state, requests) = started();
        assert_eq!(
            requests,
            vec![
                NetworkRequest::LoadTeams,
                NetworkRequest::LoadBrandYears,
                NetworkRequest::LoadBrandRankings { year: YearFilter::All, seq: 1 },
            ]
        );
        assert!(state.predictor.teams_status.is_loading());
        assert!(state.brands.status.is_loading());
    }

    #[test]
    fn backend_teams_become_the_only_options() {
        let (mut state, _) = started();
        state.apply(Action::TeamsLoaded(vec![Team {
            value: "OSU".into(),
            label: "Ohio State".into(),
        }]));
        let options = state.predictor.options(PredictorField::Team1);
        assert_eq!(options, vec![String::new(), "OSU".to_string()]);
        assert_eq!(state.predictor.teams_status, LoadStatus::Loaded);
    }

    #[test]
    fn submitting_builds_the_expected_request() {
        let (mut state, _) = started();
        let edits = [
            (PredictorField::Team1, "OSU"),
            (PredictorField::Team2, "MI"),
            (PredictorField::Rank1, "2"),
            (PredictorField::Rank2, "5"),
            (PredictorField::Spread, "3.5"),
            (PredictorField::Network, "FOX"),
            (PredictorField::TimeSlot, "Saturday"),
            (PredictorField::CompetingGames, "1"),
        ];
        for (field, raw) in edits {
            state.apply(Action::SetPredictorField(field, raw.to_string()));
        }

        let requests = state.apply(Action::RequestPrediction);
        let expected = PredictionRequest {
            team1: "OSU".into(),
            team2: "MI".into(),
            rank1: 2,
            rank2: 5,
            spread: 3.5,
            network: "FOX".into(),
            time_slot: "Saturday".into(),
            comp_tier1: 1,
        };
        assert_eq!(
            requests,
            vec![NetworkRequest::Predict { request: expected, revision: state.predictor.revision }]
        );
    }

    #[test]
    fn prediction_result_is_cleared_by_later_edits() {
        let (mut state, _) = started();
        let requests = state.apply(Action::RequestPrediction);
        let NetworkRequest::Predict { revision, .. } = requests[0].clone() else {
            panic!("expected predict request");
        };
        state.apply(Action::PredictionLoaded { revision, formatted: "6.3M".into() });
        assert_eq!(state.predictor.prediction.as_deref(), Some("6.3M"));

        state.apply(Action::SetPredictorField(PredictorField::Network, "CBS".into()));
        assert!(state.predictor.prediction.is_none());
    }

    #[test]
    fn rejected_input_is_a_silent_no_op() {
        let (mut state, _) = started();
        state.apply(Action::SetPredictorField(PredictorField::CompetingGames, "4".into()));
        let requests =
            state.apply(Action::SetPredictorField(PredictorField::CompetingGames, "40".into()));
        assert!(requests.is_empty());
        assert_eq!(state.predictor.comp_tier1, 4);
    }

    #[test]
    fn year_selection_refetches_rankings() {
        let (mut state, _) = started();
        let requests = state.apply(Action::SetBrandYear(YearFilter::Year(2021)));
        assert_eq!(
            requests,
            vec![NetworkRequest::LoadBrandRankings { year: YearFilter::Year(2021), seq: 2 }]
        );
        let requests = state.apply(Action::SetBrandYear(YearFilter::All));
        assert_eq!(
            requests,
            vec![NetworkRequest::LoadBrandRankings { year: YearFilter::All, seq: 3 }]
        );
    }

    #[test]
    fn weekly_tab_refetches_on_every_visit() {
        let (mut state, _) = started();
        let requests = state.apply(Action::SelectTab(MenuItem::Weekly));
        assert_eq!(requests, vec![NetworkRequest::LoadWeekly]);

        // Leaving and returning while the first fetch is in flight issues nothing.
        state.apply(Action::SelectTab(MenuItem::Model));
        assert!(state.apply(Action::SelectTab(MenuItem::Weekly)).is_empty());

        state.apply(Action::WeeklyLoaded(WeeklyPredictions {
            weeks: vec![
                WeekGroup { week: 2, year: None, games: vec![] },
                WeekGroup { week: 1, year: None, games: vec![] },
            ],
            metrics: None,
        }));
        assert_eq!(state.weekly.open, Some(0));
        state.apply(Action::ToggleWeek(1));
        assert_eq!(state.weekly.open, Some(1));

        state.apply(Action::SelectTab(MenuItem::Model));
        let requests = state.apply(Action::SelectTab(MenuItem::Weekly));
        assert_eq!(requests, vec![NetworkRequest::LoadWeekly]);
        assert!(state.weekly.status.is_loading());

        state.apply(Action::WeeklyLoaded(WeeklyPredictions {
            weeks: vec![WeekGroup { week: 3, year: None, games: vec![] }],
            metrics: None,
        }));
        assert_eq!(state.weekly.open_week().map(|w| w.week), Some(3));
    }

    #[test]
    fn every_failure_sets_its_own_view_message() {
        let (mut state, requests) = started();
        for request in requests {
            state.apply(Action::RequestFailed { request, message: "boom".into() });
        }
        assert_eq!(state.predictor.teams_status.error(), Some(TEAMS_FAILED));
        assert_eq!(state.brands.years_status.error(), Some(YEARS_FAILED));
        assert_eq!(state.brands.status.error(), Some(RANKINGS_FAILED));

        let weekly = state.apply(Action::SelectTab(MenuItem::Weekly));
        state.apply(Action::RequestFailed { request: weekly[0].clone(), message: "boom".into() });
        assert_eq!(state.weekly.status.error(), Some(WEEKLY_FAILED));

        let predict = state.apply(Action::RequestPrediction);
        state.apply(Action::RequestFailed { request: predict[0].clone(), message: "boom".into() });
        assert_eq!(state.predictor.status.error(), Some(PREDICTION_FAILED));
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut state = ViewState::default();
        state.apply(Action::SelectTab(MenuItem::Brands));
        state.apply(Action::SelectTab(MenuItem::Help));
        state.exit_help();
        assert_eq!(state.active_tab, MenuItem::Brands);
    }

    #[test]
    fn state_snapshot_serializes() {
        let (mut state, _) = started();
        state.apply(Action::SetPredictorField(PredictorField::Spread, "7.".into()));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["predictor"]["spread"], "7.");
        assert_eq!(json["active_tab"], "Predictor");
        let restored: ViewState = serde_json::from_value(json).unwrap();
        assert_eq!(restored.predictor.spread, "7.");
    }
}
