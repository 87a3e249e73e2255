use crate::state::LoadStatus;
use crate::state::messages::NetworkRequest;
use crate::state::validate;
use log::debug;
use serde::{Deserialize, Serialize};
use viewership_api::{Network, PredictionRequest, Team, TimeSlot};

pub const TEAMS_FAILED: &str = "Failed to load teams.";
pub const PREDICTION_FAILED: &str = "Prediction request failed.";

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictorField {
    #[default]
    Team1,
    Team2,
    Rank1,
    Rank2,
    Spread,
    Network,
    TimeSlot,
    CompetingGames,
}

impl PredictorField {
    pub const ALL: [PredictorField; 8] = [
        PredictorField::Team1,
        PredictorField::Team2,
        PredictorField::Rank1,
        PredictorField::Rank2,
        PredictorField::Spread,
        PredictorField::Network,
        PredictorField::TimeSlot,
        PredictorField::CompetingGames,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PredictorField::Team1 => "Team 1",
            PredictorField::Team2 => "Team 2",
            PredictorField::Rank1 => "Team 1 Rank (1-25)",
            PredictorField::Rank2 => "Team 2 Rank (1-25)",
            PredictorField::Spread => "Betting Spread (ex: 2.5)",
            PredictorField::Network => "Network",
            PredictorField::TimeSlot => "Time Slot (EST)",
            PredictorField::CompetingGames => "Major Competing Games",
        }
    }

    /// Text fields take typed characters; the rest cycle through options.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            PredictorField::Rank1
                | PredictorField::Rank2
                | PredictorField::Spread
                | PredictorField::CompetingGames
        )
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PredictorState {
    pub teams: Vec<Team>,
    pub teams_status: LoadStatus,

    pub team1: String,
    pub team2: String,
    pub rank1: u8,
    pub rank2: u8,
    /// Raw spread text; may carry a trailing `.` while typing.
    pub spread: String,
    pub network: String,
    pub time_slot: String,
    pub comp_tier1: u8,

    pub prediction: Option<String>,
    pub status: LoadStatus,
    /// Bumped on every accepted edit. Responses for an older revision are stale.
    pub revision: u64,
    pub focus: PredictorField,
}

impl PredictorState {
    /// Apply one edit through the field's validator. Returns false (and
    /// changes nothing) when the validator rejects the input.
    pub fn set_field(&mut self, field: PredictorField, raw: &str) -> bool {
        match field {
            PredictorField::Team1 => self.team1 = raw.to_string(),
            PredictorField::Team2 => self.team2 = raw.to_string(),
            PredictorField::Network => self.network = raw.to_string(),
            PredictorField::TimeSlot => self.time_slot = raw.to_string(),
            PredictorField::Rank1 => match validate::rank(raw) {
                Some(rank) => self.rank1 = rank,
                None => return false,
            },
            PredictorField::Rank2 => match validate::rank(raw) {
                Some(rank) => self.rank2 = rank,
                None => return false,
            },
            PredictorField::CompetingGames => match validate::competing_games(raw) {
                Some(count) => self.comp_tier1 = count,
                None => return false,
            },
            PredictorField::Spread => match validate::spread(raw) {
                Some(text) => self.spread = text,
                None => return false,
            },
        }

        self.prediction = None;
        self.status = LoadStatus::Idle;
        self.revision += 1;
        true
    }

    /// Current editable text of a field. Zero counts show as empty.
    pub fn field_text(&self, field: PredictorField) -> String {
        let count = |n: u8| if n == 0 { String::new() } else { n.to_string() };
        match field {
            PredictorField::Team1 => self.team1.clone(),
            PredictorField::Team2 => self.team2.clone(),
            PredictorField::Rank1 => count(self.rank1),
            PredictorField::Rank2 => count(self.rank2),
            PredictorField::Spread => self.spread.clone(),
            PredictorField::Network => self.network.clone(),
            PredictorField::TimeSlot => self.time_slot.clone(),
            PredictorField::CompetingGames => count(self.comp_tier1),
        }
    }

    /// What the form shows for a field, including placeholders.
    pub fn field_display(&self, field: PredictorField) -> String {
        let text = self.field_text(field);
        match field {
            PredictorField::Team1 | PredictorField::Team2 if text.is_empty() => {
                "Select a team".to_string()
            }
            PredictorField::Team1 | PredictorField::Team2 => self
                .teams
                .iter()
                .find(|t| t.value == text)
                .map(|t| t.label.clone())
                .unwrap_or(text),
            PredictorField::Network if text.is_empty() => "Select Network".to_string(),
            PredictorField::TimeSlot if text.is_empty() => "Select Time Slot".to_string(),
            PredictorField::TimeSlot => TimeSlot::from_value(&text)
                .map(|slot| slot.label().to_string())
                .unwrap_or(text),
            PredictorField::Rank1 | PredictorField::Rank2 if text.is_empty() => {
                "Unranked".to_string()
            }
            PredictorField::Spread if text.is_empty() => "Enter spread".to_string(),
            PredictorField::CompetingGames if text.is_empty() => "None".to_string(),
            _ => text,
        }
    }

    /// Option values for select fields, led by the empty "nothing selected" value.
    pub fn options(&self, field: PredictorField) -> Vec<String> {
        let mut options = vec![String::new()];
        match field {
            PredictorField::Team1 | PredictorField::Team2 => {
                options.extend(self.teams.iter().map(|t| t.value.clone()));
            }
            PredictorField::Network => {
                options.extend(Network::ALL.iter().map(|n| n.code().to_string()));
            }
            PredictorField::TimeSlot => {
                options.extend(TimeSlot::ALL.iter().map(|s| s.value().to_string()));
            }
            _ => return Vec::new(),
        }
        options
    }

    /// The option after (or before) the current value of a select field.
    pub fn cycled_option(&self, field: PredictorField, forward: bool) -> Option<String> {
        let options = self.options(field);
        if options.len() < 2 {
            return None;
        }
        let current = self.field_text(field);
        let len = options.len();
        let next = match options.iter().position(|o| *o == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        options.into_iter().nth(next)
    }

    pub fn build_request(&self) -> PredictionRequest {
        PredictionRequest {
            team1: self.team1.clone(),
            team2: self.team2.clone(),
            rank1: self.rank1,
            rank2: self.rank2,
            spread: validate::spread_value(&self.spread),
            network: self.network.clone(),
            time_slot: self.time_slot.clone(),
            comp_tier1: self.comp_tier1,
        }
    }

    pub fn begin_prediction(&mut self) -> NetworkRequest {
        self.status = LoadStatus::Loading;
        NetworkRequest::Predict { request: self.build_request(), revision: self.revision }
    }

    pub fn on_prediction(&mut self, revision: u64, formatted: String) {
        if revision != self.revision {
            debug!("dropping prediction for revision {revision}, inputs are at {}", self.revision);
            return;
        }
        self.prediction = Some(formatted);
        self.status = LoadStatus::Loaded;
    }

    pub fn on_prediction_failed(&mut self, revision: u64) {
        if revision != self.revision {
            return;
        }
        self.status = LoadStatus::Failed(PREDICTION_FAILED.to_string());
    }

    pub fn on_teams(&mut self, teams: Vec<Team>) {
        self.teams = teams;
        self.teams_status = LoadStatus::Loaded;
    }

    /// "OSU vs MI | FOX | Sunday", skipping parts that are not set.
    pub fn matchup_line(&self) -> String {
        let mut line = String::new();
        if !self.team1.is_empty() && !self.team2.is_empty() {
            line.push_str(&format!("{} vs {}", self.team1, self.team2));
        }
        if !self.network.is_empty() {
            line.push_str(&format!(" | {}", self.network));
        }
        if !self.time_slot.is_empty() {
            line.push_str(&format!(" | {}", self.time_slot));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_prediction() -> PredictorState {
        let mut state = PredictorState::default();
        let revision = state.revision;
        state.on_prediction(revision, "5.2M".into());
        assert_eq!(state.prediction.as_deref(), Some("5.2M"));
        state
    }

    #[test]
    fn rejected_rank_leaves_state_untouched() {
        let mut state = with_prediction();
        assert!(state.set_field(PredictorField::Rank1, "12"));
        state.on_prediction(state.revision, "5.2M".into());
        let revision = state.revision;

        assert!(!state.set_field(PredictorField::Rank1, "26"));
        assert!(!state.set_field(PredictorField::Rank1, "abc"));
        assert_eq!(state.rank1, 12);
        assert_eq!(state.revision, revision);
        assert_eq!(state.prediction.as_deref(), Some("5.2M"));
    }

    #[test]
    fn empty_rank_means_unranked() {
        let mut state = PredictorState::default();
        assert!(state.set_field(PredictorField::Rank2, "4"));
        assert!(state.set_field(PredictorField::Rank2, ""));
        assert_eq!(state.rank2, 0);
        assert_eq!(state.field_text(PredictorField::Rank2), "");
        assert_eq!(state.field_display(PredictorField::Rank2), "Unranked");
    }

    #[test]
    fn every_field_change_clears_the_prediction() {
        let edits = [
            (PredictorField::Team1, "OSU"),
            (PredictorField::Team2, "MI"),
            (PredictorField::Rank1, "3"),
            (PredictorField::Rank2, "9"),
            (PredictorField::Spread, "6.5"),
            (PredictorField::Network, "FOX"),
            (PredictorField::TimeSlot, "Sunday"),
            (PredictorField::CompetingGames, "2"),
        ];
        for (field, raw) in edits {
            let mut state = with_prediction();
            assert!(state.set_field(field, raw));
            assert!(state.prediction.is_none(), "{field:?} should clear the prediction");
        }
    }

    #[test]
    fn spread_keeps_transient_text_and_rejects_bad_fractions() {
        let mut state = PredictorState::default();
        assert!(state.set_field(PredictorField::Spread, "3"));
        assert!(state.set_field(PredictorField::Spread, "3."));
        assert_eq!(state.spread, "3.");
        assert!(!state.set_field(PredictorField::Spread, "3.2"));
        assert_eq!(state.spread, "3.");
        assert!(state.set_field(PredictorField::Spread, "3.5"));
        assert!(!state.set_field(PredictorField::Spread, "3.55"));
        assert_eq!(state.spread, "3.5");
    }

    #[test]
    fn request_coerces_spread_to_a_number() {
        let mut state = PredictorState::default();
        assert_eq!(state.build_request().spread, 0.0);
        state.set_field(PredictorField::Spread, "3.");
        assert_eq!(state.build_request().spread, 3.0);
        state.set_field(PredictorField::Spread, "3.5");
        assert_eq!(state.build_request().spread, 3.5);
    }

    #[test]
    fn stale_prediction_is_dropped() {
        let mut state = PredictorState::default();
        state.set_field(PredictorField::Team1, "OSU");
        let NetworkRequest::Predict { revision, .. } = state.begin_prediction() else {
            panic!("expected a predict request");
        };
        state.set_field(PredictorField::Team2, "MI");
        state.on_prediction(revision, "8.0M".into());
        assert!(state.prediction.is_none());
        assert_eq!(state.status, LoadStatus::Idle);
    }

    #[test]
    fn failed_prediction_surfaces_a_message() {
        let mut state = PredictorState::default();
        let NetworkRequest::Predict { revision, .. } = state.begin_prediction() else {
            panic!("expected a predict request");
        };
        state.on_prediction_failed(revision);
        assert_eq!(state.status.error(), Some(PREDICTION_FAILED));
        assert!(state.prediction.is_none());
    }

    #[test]
    fn team_options_follow_backend_list() {
        let mut state = PredictorState::default();
        state.on_teams(vec![Team { value: "OSU".into(), label: "Ohio State".into() }]);
        assert_eq!(state.options(PredictorField::Team1), vec!["".to_string(), "OSU".to_string()]);
        assert_eq!(
            state.cycled_option(PredictorField::Team1, true).as_deref(),
            Some("OSU")
        );
        state.set_field(PredictorField::Team1, "OSU");
        assert_eq!(state.field_display(PredictorField::Team1), "Ohio State");
        assert_eq!(state.cycled_option(PredictorField::Team1, true).as_deref(), Some(""));
    }

    #[test]
    fn select_cycling_wraps_backwards() {
        let state = PredictorState::default();
        assert_eq!(
            state.cycled_option(PredictorField::Network, false).as_deref(),
            Some("ESPNNEWS")
        );
        assert_eq!(
            state.cycled_option(PredictorField::TimeSlot, true).as_deref(),
            Some("Primetime (7:00p–9:00p)")
        );
        assert_eq!(state.cycled_option(PredictorField::Spread, true), None);
    }

    #[test]
    fn focus_wraps_around_the_form() {
        assert_eq!(PredictorField::CompetingGames.next(), PredictorField::Team1);
        assert_eq!(PredictorField::Team1.prev(), PredictorField::CompetingGames);
        assert!(PredictorField::Spread.is_text());
        assert!(!PredictorField::Network.is_text());
    }

    #[test]
    fn matchup_line_skips_missing_parts() {
        let mut state = PredictorState::default();
        assert_eq!(state.matchup_line(), "");
        state.set_field(PredictorField::Team1, "OSU");
        state.set_field(PredictorField::Network, "FOX");
        assert_eq!(state.matchup_line(), " | FOX");
        state.set_field(PredictorField::Team2, "MI");
        state.set_field(PredictorField::TimeSlot, "Sunday");
        assert_eq!(state.matchup_line(), "OSU vs MI | FOX | Sunday");
    }
}
