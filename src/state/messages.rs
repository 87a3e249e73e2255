use crate::state::network::LoadingState;
use crate::state::view_state::Action;
use crossterm::event::KeyEvent;
use viewership_api::{BrandRow, PredictionRequest, Team, WeeklyPredictions, YearFilter};

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkRequest {
    LoadTeams,
    LoadBrandYears,
    /// `seq` lets the view drop responses for a filter it has moved away from.
    LoadBrandRankings { year: YearFilter, seq: u64 },
    Predict { request: PredictionRequest, revision: u64 },
    LoadWeekly,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TeamsLoaded { teams: Vec<Team> },
    BrandYearsLoaded { years: Vec<u16> },
    BrandRankingsLoaded { seq: u64, rows: Vec<BrandRow> },
    PredictionLoaded { revision: u64, formatted: String },
    WeeklyLoaded { weekly: WeeklyPredictions },
    Failed { request: NetworkRequest, message: String },
}

impl NetworkResponse {
    /// The state transition a completed request maps to. Spinner updates have none.
    pub fn into_action(self) -> Option<Action> {
        let action = match self {
            NetworkResponse::LoadingStateChanged { .. } => return None,
            NetworkResponse::TeamsLoaded { teams } => Action::TeamsLoaded(teams),
            NetworkResponse::BrandYearsLoaded { years } => Action::BrandYearsLoaded(years),
            NetworkResponse::BrandRankingsLoaded { seq, rows } => {
                Action::BrandRankingsLoaded { seq, rows }
            }
            NetworkResponse::PredictionLoaded { revision, formatted } => {
                Action::PredictionLoaded { revision, formatted }
            }
            NetworkResponse::WeeklyLoaded { weekly } => Action::WeeklyLoaded(weekly),
            NetworkResponse::Failed { request, message } => {
                Action::RequestFailed { request, message }
            }
        };
        Some(action)
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
