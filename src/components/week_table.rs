use tui::layout::Constraint;
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Cell, Row, Table};
use viewership_api::{GameRow, WeekGroup};

const PREGAME_HEADERS: [&str; 9] = [
    "Date",
    "Time",
    "Matchup",
    "Spread",
    "Network",
    "Pregame Pred",
    "% Error (Pre)",
    "Accuracy (Pre)",
    "Actual",
];

const POSTGAME_HEADERS: [&str; 3] = ["Postgame Pred", "% Error (Post)", "Accuracy (Post)"];

/// Error bands for a game's percent error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Medium,
    High,
}

impl Severity {
    pub fn color(&self) -> Color {
        match self {
            Severity::Medium => Color::Yellow,
            Severity::High => Color::Red,
        }
    }
}

/// 35 and up is high, 25 and up is medium, everything else is unbanded.
pub fn severity(error: Option<f64>) -> Option<Severity> {
    match error? {
        e if e >= 35.0 => Some(Severity::High),
        e if e >= 25.0 => Some(Severity::Medium),
        _ => None,
    }
}

pub fn format_error(error: Option<f64>) -> String {
    error.map(|e| format!("{e:.1}%")).unwrap_or_default()
}

fn text_cell(value: &Option<String>) -> Cell<'static> {
    Cell::from(value.clone().unwrap_or_default())
}

fn error_cell(error: Option<f64>) -> Cell<'static> {
    let style = severity(error)
        .map(|s| Style::default().fg(s.color()).add_modifier(Modifier::BOLD))
        .unwrap_or_default();
    Cell::from(format_error(error)).style(style)
}

fn game_cells(game: &GameRow, postgame: bool) -> Vec<Cell<'static>> {
    let mut cells = vec![
        text_cell(&game.date),
        text_cell(&game.time_slot),
        text_cell(&game.matchup),
        text_cell(&game.spread),
        text_cell(&game.network),
        text_cell(&game.predicted),
        error_cell(game.percent_error),
        text_cell(&game.accuracy),
    ];
    if postgame {
        cells.push(text_cell(&game.post_predicted));
        cells.push(error_cell(game.post_percent_error));
        cells.push(text_cell(&game.post_accuracy));
    }
    cells.push(text_cell(&game.actual));
    cells
}

/// Column headers in display order. Postgame columns sit between the
/// pregame block and "Actual".
pub fn headers(postgame: bool) -> Vec<&'static str> {
    let (pregame, actual) = PREGAME_HEADERS.split_at(PREGAME_HEADERS.len() - 1);
    let mut headers = pregame.to_vec();
    if postgame {
        headers.extend(POSTGAME_HEADERS);
    }
    headers.extend(actual);
    headers
}

fn widths(postgame: bool) -> Vec<Constraint> {
    headers(postgame)
        .iter()
        .map(|h| match *h {
            "Matchup" => Constraint::Fill(3),
            "Date" | "Time" => Constraint::Fill(2),
            _ => Constraint::Fill(1),
        })
        .collect()
}

/// Game table for one week starting at row `scroll`. Postgame columns only
/// appear when some game in the week carries postgame output.
pub fn build_table(week: &WeekGroup, scroll: usize) -> Table<'static> {
    let postgame = week.has_postgame();
    let header = Row::new(headers(postgame))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::UNDERLINED));
    let rows: Vec<Row> = week
        .games
        .iter()
        .skip(scroll)
        .map(|game| Row::new(game_cells(game, postgame)))
        .collect();

    Table::new(rows, widths(postgame)).header(header).column_spacing(1)
}
