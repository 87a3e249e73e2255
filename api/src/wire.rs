/// Wire envelopes for the viewership backend.
/// Every list defaults to empty so a partial body still renders.
use crate::{BrandRow, ErrorSummary, Team, WeekGroup, WeeklyMetrics, WeeklyPredictions};
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<Team>,
}

#[derive(Deserialize, Default, Debug)]
pub struct BrandYearsResponse {
    #[serde(default)]
    pub years: Vec<u16>,
}

#[derive(Deserialize, Default, Debug)]
pub struct BrandRankingsResponse {
    #[serde(default)]
    pub rows: Vec<BrandRow>,
}

#[derive(Deserialize, Default, Debug)]
pub struct PredictResponse {
    pub prediction_formatted: String,
}

#[derive(Deserialize, Default, Debug)]
pub struct WeeklyResponse {
    #[serde(default)]
    pub weeks: Vec<WeekGroup>,
    #[serde(default)]
    pub metrics: Option<WireMetrics>,
}

/// The backend has shipped two metric layouts: a split pregame/postgame
/// object and an older flat summary.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum WireMetrics {
    Split {
        pregame: ErrorSummary,
        #[serde(default)]
        postgame: Option<ErrorSummary>,
    },
    Flat(ErrorSummary),
}

impl From<WireMetrics> for WeeklyMetrics {
    fn from(raw: WireMetrics) -> Self {
        match raw {
            WireMetrics::Split { pregame, postgame } => WeeklyMetrics { pregame, postgame },
            WireMetrics::Flat(pregame) => WeeklyMetrics { pregame, postgame: None },
        }
    }
}

impl From<WeeklyResponse> for WeeklyPredictions {
    fn from(raw: WeeklyResponse) -> Self {
        WeeklyPredictions {
            weeks: raw.weeks,
            metrics: raw.metrics.map(WeeklyMetrics::from),
        }
    }
}
