pub mod client;
pub mod wire;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// A selectable team. `value` is the identifier the backend expects in a
/// prediction request, `label` is what the user sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub value: String,
    pub label: String,
}

/// Body of `POST /predict`. Field names are the wire names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub team1: String,
    pub team2: String,
    pub rank1: u8, // 0 = unranked
    pub rank2: u8,
    pub spread: f64,
    pub network: String,
    pub time_slot: String,
    pub comp_tier1: u8,
}

/// One row of the brand pull table, in backend rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandRow {
    pub rank: u32,
    pub team: String,
    pub viewership_lift_pct: f64,
    pub games_used: u32,
}

/// Year scope for `/brand-rankings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(u16),
}

impl YearFilter {
    /// Query string value, `None` for the unfiltered table.
    pub fn query_value(&self) -> Option<u16> {
        match self {
            YearFilter::All => None,
            YearFilter::Year(y) => Some(*y),
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => write!(f, "All Years"),
            YearFilter::Year(y) => write!(f, "{y}"),
        }
    }
}

/// Accuracy summary for one model variant (pregame or postgame).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub median_error: f64,
    pub mean_error: f64,
    pub pct_within_10: f64,
    pub pct_within_25: f64,
}

/// Aggregate metrics for the weekly view. Older backends only report a
/// single summary, which lands in `pregame`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMetrics {
    pub pregame: ErrorSummary,
    pub postgame: Option<ErrorSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekGroup {
    pub week: u32,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub games: Vec<GameRow>,
}

impl WeekGroup {
    pub fn title(&self) -> String {
        match self.year {
            Some(year) => format!("Week {} ({year})", self.week),
            None => format!("Week {}", self.week),
        }
    }

    /// True when any game carries postgame model output.
    pub fn has_postgame(&self) -> bool {
        self.games.iter().any(GameRow::has_postgame)
    }
}

/// A single game inside a week. Display-only cells are kept as text since
/// the backend sends some of them as numbers and some as preformatted strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRow {
    #[serde(default, deserialize_with = "display_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub time_slot: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub matchup: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub spread: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub network: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub predicted: Option<String>,
    #[serde(default)]
    pub percent_error: Option<f64>,
    #[serde(default, deserialize_with = "display_text")]
    pub accuracy: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub post_predicted: Option<String>,
    #[serde(default)]
    pub post_percent_error: Option<f64>,
    #[serde(default, deserialize_with = "display_text")]
    pub post_accuracy: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub actual: Option<String>,
}

impl GameRow {
    pub fn has_postgame(&self) -> bool {
        self.post_predicted.is_some()
            || self.post_percent_error.is_some()
            || self.post_accuracy.is_some()
    }
}

/// Everything `/weekly-predictions` returns, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPredictions {
    pub weeks: Vec<WeekGroup>,
    pub metrics: Option<WeeklyMetrics>,
}

/// Broadcast networks the model has coefficients for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Abc,
    Cbs,
    Nbc,
    Fox,
    Espn,
    Espn2,
    Espnu,
    Fs1,
    Fs2,
    Btn,
    Cw,
    Nfln,
    EspnNews,
}

impl Network {
    pub const ALL: [Network; 13] = [
        Network::Abc,
        Network::Cbs,
        Network::Nbc,
        Network::Fox,
        Network::Espn,
        Network::Espn2,
        Network::Espnu,
        Network::Fs1,
        Network::Fs2,
        Network::Btn,
        Network::Cw,
        Network::Nfln,
        Network::EspnNews,
    ];

    /// Wire value, which doubles as the display label.
    pub fn code(&self) -> &'static str {
        match self {
            Network::Abc => "ABC",
            Network::Cbs => "CBS",
            Network::Nbc => "NBC",
            Network::Fox => "FOX",
            Network::Espn => "ESPN",
            Network::Espn2 => "ESPN2",
            Network::Espnu => "ESPNU",
            Network::Fs1 => "FS1",
            Network::Fs2 => "FS2",
            Network::Btn => "BTN",
            Network::Cw => "CW",
            Network::Nfln => "NFLN",
            Network::EspnNews => "ESPNNEWS",
        }
    }
}

/// Kickoff windows (EST). The wire values are what the model was trained on
/// and use en dashes; labels are what the selector shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    Primetime,
    Sunday,
    Monday,
    Weekday,
    Friday,
    SatEarly,
    SatMid,
    SatLate,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 8] = [
        TimeSlot::Primetime,
        TimeSlot::Sunday,
        TimeSlot::Monday,
        TimeSlot::Weekday,
        TimeSlot::Friday,
        TimeSlot::SatEarly,
        TimeSlot::SatMid,
        TimeSlot::SatLate,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            TimeSlot::Primetime => "Primetime (7:00p–9:00p)",
            TimeSlot::Sunday => "Sunday",
            TimeSlot::Monday => "Monday",
            TimeSlot::Weekday => "Weekday (Tue–Thu)",
            TimeSlot::Friday => "Friday",
            TimeSlot::SatEarly => "Sat Early (11:00a–2:00p)",
            TimeSlot::SatMid => "Sat Mid (2:30p–6:30p)",
            TimeSlot::SatLate => "Sat Late (9:30p–11:30p)",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Primetime => "Primetime (7:00p-9:00p EST)",
            TimeSlot::Sunday => "Sunday",
            TimeSlot::Monday => "Monday",
            TimeSlot::Weekday => "Weekday",
            TimeSlot::Friday => "Friday",
            TimeSlot::SatEarly => "Sat Early (11:00a-2:00p EST)",
            TimeSlot::SatMid => "Sat Mid (2:30p-6:30p EST)",
            TimeSlot::SatLate => "Sat Late (9:30p-12:00a EST)",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.value() == value)
    }
}

/// Accepts a string or a number (or null) and keeps it as display text.
fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_row_accepts_numbers_and_nulls_in_display_cells() {
        let row: GameRow = serde_json::from_value(serde_json::json!({
            "date": "2025-09-06",
            "time_slot": "Sat Mid",
            "matchup": "Michigan @ Oklahoma",
            "spread": -4.5,
            "network": "ABC",
            "predicted": "7.1M",
            "percent_error": 12.25,
            "accuracy": "Good",
            "actual": null
        }))
        .unwrap();
        assert_eq!(row.spread.as_deref(), Some("-4.5"));
        assert_eq!(row.actual, None);
        assert_eq!(row.post_percent_error, None);
        assert!(!row.has_postgame());
    }

    #[test]
    fn week_title_includes_year_when_present() {
        let week = WeekGroup { week: 3, year: Some(2025), games: vec![] };
        assert_eq!(week.title(), "Week 3 (2025)");
        let week = WeekGroup { week: 3, year: None, games: vec![] };
        assert_eq!(week.title(), "Week 3");
    }

    #[test]
    fn network_codes_are_unique() {
        let mut codes: Vec<&str> = Network::ALL.iter().map(Network::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Network::ALL.len());
        assert!(codes.contains(&"ESPNNEWS"));
    }

    #[test]
    fn time_slot_values_round_trip_through_lookup() {
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::from_value(slot.value()), Some(slot));
        }
        assert_eq!(TimeSlot::from_value("Saturday"), None);
    }

    #[test]
    fn year_filter_query_value() {
        assert_eq!(YearFilter::All.query_value(), None);
        assert_eq!(YearFilter::Year(2023).query_value(), Some(2023));
        assert_eq!(YearFilter::Year(2023).to_string(), "2023");
        assert_eq!(YearFilter::All.to_string(), "All Years");
    }
}
