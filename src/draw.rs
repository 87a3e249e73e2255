use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::explanation::{
    BRAND_BLURB, LIFT_EXPLAINER, LIFT_HEADING, MODEL_PARAGRAPHS, MODEL_TITLE,
};
use crate::components::metrics::MetricsPanel;
use crate::components::week_table;
use crate::state::LoadStatus;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::predictor::{PredictorField, PredictorState};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 4] = &[
    "Game Predictor",
    "Brand Rankings",
    "Weekly Predictions",
    "Model Explanation",
];

const LABEL_WIDTH: usize = 28;
const WEEK_LIST_WIDTH: u16 = 20;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Predictor => draw_predictor(f, layout.main, app),
            MenuItem::Brands => draw_brands(f, layout.main, app),
            MenuItem::Weekly => draw_weekly(f, layout.main, app),
            MenuItem::Model => draw_model(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(err) = result {
        error!("failed to draw frame: {err}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn tab_index(tab: MenuItem) -> usize {
    match tab {
        MenuItem::Predictor => 0,
        MenuItem::Brands => 1,
        MenuItem::Weekly => 2,
        MenuItem::Model => 3,
        MenuItem::Help => 0,
    }
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    // The help overlay keeps the tab it was opened from underlined.
    let selected = match app.state.active_tab {
        MenuItem::Help => app.state.previous_tab,
        tab => tab,
    };

    let titles: Vec<Line> = TABS
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {t}", i + 1)))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index(selected))
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Game predictor
// ---------------------------------------------------------------------------

fn draw_predictor(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Predict Viewership ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let predictor = &app.state.predictor;
    let form_height = PredictorField::ALL.len() as u16 + 2;
    let [form_area, hint_area, result_area] = Layout::vertical([
        Constraint::Length(form_height),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(Paragraph::new(form_lines(predictor)), form_area);
    f.render_widget(
        Paragraph::new(
            "Tab/↑/↓ move  ←/→ choose  type digits for ranks, spread and games  Enter predict",
        )
        .style(Style::default().fg(Color::DarkGray)),
        hint_area,
    );
    f.render_widget(Paragraph::new(result_lines(predictor)), result_area);
}

fn form_lines(predictor: &PredictorState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match &predictor.teams_status {
        LoadStatus::Loading => lines.push(Line::from(Span::styled(
            "Loading teams...",
            Style::default().fg(Color::DarkGray),
        ))),
        LoadStatus::Failed(message) => lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))),
        _ => lines.push(Line::from("")),
    }
    lines.push(Line::from(""));

    for field in PredictorField::ALL {
        let focused = predictor.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let value = predictor.field_display(field);
        let value_style = if predictor.field_text(field).is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        let value = if field.is_text() || !focused {
            value
        } else {
            format!("◂ {value} ▸")
        };

        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
            Span::styled(value, value_style),
        ]));
    }
    lines
}

fn result_lines(predictor: &PredictorState) -> Vec<Line<'static>> {
    if predictor.status.is_loading() {
        return vec![Line::from(Span::styled(
            "Predicting...",
            Style::default().fg(Color::DarkGray),
        ))];
    }
    if let Some(message) = predictor.status.error() {
        return vec![Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        ))];
    }
    let Some(prediction) = predictor.prediction.as_ref() else {
        return Vec::new();
    };

    vec![
        Line::from(vec![
            Span::raw("Predicted Viewers: "),
            Span::styled(
                prediction.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            predictor.matchup_line(),
            Style::default().fg(Color::Gray),
        )),
    ]
}

// ---------------------------------------------------------------------------
// Brand rankings
// ---------------------------------------------------------------------------

fn draw_brands(f: &mut Frame, area: Rect, app: &App) {
    let brands = &app.state.brands;
    let title = match brands.loaded_at.as_deref() {
        Some(at) => format!(" Brand Rankings (updated {at}) "),
        None => " Brand Rankings ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [blurb_area, year_area, table_area, explainer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(6),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(BRAND_BLURB)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        blurb_area,
    );

    let mut selector = vec![
        Span::raw("Select Year: "),
        Span::styled(
            format!("◂ {} ▸", brands.year),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(message) = brands.years_status.error() {
        selector.push(Span::raw("  "));
        selector.push(Span::styled(message.to_string(), Style::default().fg(Color::Red)));
    }
    f.render_widget(Paragraph::new(Line::from(selector)), year_area);

    match &brands.status {
        LoadStatus::Loading | LoadStatus::Idle => draw_message(f, table_area, "Loading…", Color::DarkGray),
        LoadStatus::Failed(message) => draw_message(f, table_area, message, Color::Red),
        LoadStatus::Loaded => {
            let header = Row::new(["Rank", "Team", "Lift (%)", "Games Used"]).style(
                Style::default().fg(Color::Gray).add_modifier(Modifier::UNDERLINED),
            );
            let rows: Vec<Row> = brands
                .rows
                .iter()
                .skip(brands.scroll_offset as usize)
                .map(|row| {
                    Row::new([
                        Cell::from(row.rank.to_string()),
                        Cell::from(row.team.clone()),
                        Cell::from(format!("{:.1}", row.viewership_lift_pct)),
                        Cell::from(row.games_used.to_string()),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Length(6),
                Constraint::Fill(3),
                Constraint::Length(10),
                Constraint::Length(12),
            ];
            f.render_widget(Table::new(rows, widths).header(header), table_area);
        }
    }

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                LIFT_HEADING,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(LIFT_EXPLAINER, Style::default().fg(Color::DarkGray))),
        ])
        .wrap(Wrap { trim: true }),
        explainer_area,
    );
}

// ---------------------------------------------------------------------------
// Weekly predictions
// ---------------------------------------------------------------------------

fn draw_weekly(f: &mut Frame, area: Rect, app: &App) {
    let weekly = &app.state.weekly;
    let title = match weekly.loaded_at.as_deref() {
        Some(at) => format!(" Weekly Predictions (updated {at}) "),
        None => " Weekly Predictions ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &weekly.status {
        LoadStatus::Idle | LoadStatus::Loading => {
            draw_message(f, inner, "Loading weekly predictions…", Color::DarkGray);
            return;
        }
        LoadStatus::Failed(message) => {
            draw_message(f, inner, message, Color::Red);
            return;
        }
        LoadStatus::Loaded => {}
    }

    let metrics_height = weekly.metrics.as_ref().map(MetricsPanel::height).unwrap_or(0);
    let [metrics_area, weeks_area] =
        Layout::vertical([Constraint::Length(metrics_height), Constraint::Fill(1)]).areas(inner);
    if let Some(metrics) = weekly.metrics.as_ref() {
        f.render_widget(MetricsPanel { metrics }, metrics_area);
    }

    if weekly.weeks.is_empty() {
        draw_message(f, weeks_area, "No weekly predictions yet.", Color::DarkGray);
        return;
    }

    let [list_area, table_area] =
        Layout::horizontal([Constraint::Length(WEEK_LIST_WIDTH), Constraint::Fill(1)])
            .areas(weeks_area);

    let lines: Vec<Line> = weekly
        .weeks
        .iter()
        .enumerate()
        .map(|(i, week)| {
            let arrow = if weekly.open == Some(i) { "▾" } else { "▸" };
            let style = if weekly.cursor == i {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(format!("{arrow} {}", week.title()), style))
        })
        .collect();
    let list_block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let offset = weekly.cursor.saturating_sub(list_area.height.saturating_sub(1) as usize);
    f.render_widget(
        Paragraph::new(lines).block(list_block).scroll((offset as u16, 0)),
        list_area,
    );

    let Some(week) = weekly.open_week() else {
        draw_message(f, table_area, "Enter opens the highlighted week.", Color::DarkGray);
        return;
    };
    let [title_area, games_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(table_area);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", week.title()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title_area,
    );
    f.render_widget(week_table::build_table(week, weekly.games_scroll as usize), games_area);
}

// ---------------------------------------------------------------------------
// Model explanation, help, logs
// ---------------------------------------------------------------------------

fn draw_model(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(format!(" {MODEL_TITLE} "));
    let mut lines = Vec::new();
    for paragraph in MODEL_PARAGRAPHS {
        lines.push(Line::from(paragraph));
        lines.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((app.state.explanation_scroll, 0)),
        area,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let rows = [
        ("q / Ctrl-C", "quit"),
        ("1-4 / F1-F4", "switch tab"),
        ("Esc", "close help"),
        ("f", "toggle full screen"),
        ("\"", "toggle log pane"),
        ("", ""),
        ("Model Explanation", ""),
        ("↑ / ↓ / j / k", "scroll"),
        ("", ""),
        ("Predictor", ""),
        ("Tab / ↓ / j", "next field"),
        ("Shift-Tab / ↑ / k", "previous field"),
        ("← / →", "change team, network or time slot"),
        ("0-9 .", "type rank, spread or competing games"),
        ("Backspace / Del", "delete a character / clear field"),
        ("Enter", "predict viewership"),
        ("", ""),
        ("Brand Rankings", ""),
        ("← / → / h / l", "change year"),
        ("↑ / ↓ / j / k", "scroll"),
        ("r", "reload"),
        ("", ""),
        ("Weekly Predictions", ""),
        ("↑ / ↓ / j / k", "move between weeks"),
        ("Enter / Space", "expand or collapse week"),
        ("PgUp / PgDn / K / J", "scroll the open week's games"),
        ("r", "reload"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(keys, action)| {
            if action.is_empty() {
                Line::from(Span::styled(*keys, Style::default().add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("  {keys:<20}"), Style::default().fg(Color::Yellow)),
                    Span::raw(*action),
                ])
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str, color: Color) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use crate::state::brands::RANKINGS_FAILED;
    use tui::backend::TestBackend;
    use viewership_api::{BrandRow, GameRow, WeekGroup, WeeklyPredictions};

    fn render(app: &App, view: fn(&mut Frame, Rect, &App)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| view(f, f.area(), app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn brands_with(status: LoadStatus) -> App {
        let mut app = App::new(AppSettings::default());
        app.state.brands.rows = vec![BrandRow {
            rank: 1,
            team: "Ohio State".into(),
            viewership_lift_pct: 152.345,
            games_used: 14,
        }];
        app.state.brands.status = status;
        app
    }

    #[test]
    fn brands_render_exactly_one_state() {
        let loading = render(&brands_with(LoadStatus::Loading), draw_brands);
        assert!(loading.contains("Loading…"));
        assert!(!loading.contains(RANKINGS_FAILED));
        assert!(!loading.contains("Games Used"));

        let failed = render(
            &brands_with(LoadStatus::Failed(RANKINGS_FAILED.to_string())),
            draw_brands,
        );
        assert!(failed.contains(RANKINGS_FAILED));
        assert!(!failed.contains("Loading…"));
        assert!(!failed.contains("Games Used"));

        let loaded = render(&brands_with(LoadStatus::Loaded), draw_brands);
        assert!(loaded.contains("Games Used"));
        assert!(loaded.contains("152.3"));
        assert!(!loaded.contains("Loading…"));
        assert!(!loaded.contains(RANKINGS_FAILED));
    }

    #[test]
    fn brand_year_failure_sits_next_to_the_selector() {
        let mut app = brands_with(LoadStatus::Loaded);
        app.state.brands.years_status = LoadStatus::Failed("Failed to load brand years.".into());
        let screen = render(&app, draw_brands);
        assert!(screen.contains("Failed to load brand years."));
        assert!(screen.contains("Games Used"));
    }

    #[test]
    fn prediction_result_shows_viewers_and_matchup() {
        let mut app = App::new(AppSettings::default());
        let predictor = &mut app.state.predictor;
        predictor.set_field(PredictorField::Team1, "OSU");
        predictor.set_field(PredictorField::Team2, "MI");
        predictor.set_field(PredictorField::Network, "FOX");
        let revision = predictor.revision;
        predictor.on_prediction(revision, "6.3M".into());

        let screen = render(&app, draw_predictor);
        assert!(screen.contains("Predicted Viewers: 6.3M"));
        assert!(screen.contains("OSU vs MI | FOX"));
    }

    #[test]
    fn weekly_shows_the_scrolled_rows_of_the_open_week() {
        let mut app = App::new(AppSettings::default());
        let games = (0..40)
            .map(|i| GameRow { matchup: Some(format!("Game {i:02}")), ..Default::default() })
            .collect();
        app.state.weekly.on_loaded(WeeklyPredictions {
            weeks: vec![WeekGroup { week: 9, year: Some(2025), games }],
            metrics: None,
        });

        let top = render(&app, draw_weekly);
        assert!(top.contains("Week 9 (2025)"));
        assert!(top.contains("Game 00"));
        assert!(!top.contains("Game 39"));

        app.state.weekly.scroll_games_down(39);
        let bottom = render(&app, draw_weekly);
        assert!(bottom.contains("Game 39"));
        assert!(!bottom.contains("Game 00"));
    }
}
