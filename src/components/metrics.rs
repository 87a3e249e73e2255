use tui::buffer::Buffer;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use viewership_api::{ErrorSummary, WeeklyMetrics};

/// Rows one model's card strip needs: border, label, value, border.
pub const CARD_HEIGHT: u16 = 4;

/// Summary cards for the pregame model, plus the postgame model when the
/// backend reports one.
pub struct MetricsPanel<'a> {
    pub metrics: &'a WeeklyMetrics,
}

impl MetricsPanel<'_> {
    /// Rows the panel occupies, including each model's title line.
    pub fn height(metrics: &WeeklyMetrics) -> u16 {
        let models = if metrics.postgame.is_some() { 2 } else { 1 };
        models * (CARD_HEIGHT + 1)
    }
}

impl Widget for MetricsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut models = vec![("Pregame Model", &self.metrics.pregame)];
        if let Some(postgame) = self.metrics.postgame.as_ref() {
            models.push(("Postgame Model", postgame));
        }

        let rows = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT + 1); models.len()])
            .split(area);
        for ((title, summary), row) in models.into_iter().zip(rows.iter()) {
            render_model(title, summary, *row, buf);
        }
    }
}

fn render_model(title: &str, summary: &ErrorSummary, area: Rect, buf: &mut Buffer) {
    let [title_area, cards_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(CARD_HEIGHT)]).areas(area);
    Paragraph::new(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .render(title_area, buf);

    let cards: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(cards_area);
    for ((label, value), card) in card_values(summary).into_iter().zip(cards) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(card);
        block.render(card, buf);
        Paragraph::new(vec![
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                value,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .render(inner, buf);
    }
}

/// Card labels and values. Error averages get one decimal, the within-band
/// percentages are shown as reported.
pub fn card_values(summary: &ErrorSummary) -> [(&'static str, String); 4] {
    [
        ("Median % Error", format!("{:.1}%", summary.median_error)),
        ("Mean % Error", format!("{:.1}%", summary.mean_error)),
        ("Within 10%", format!("{}%", summary.pct_within_10)),
        ("Within 25%", format!("{}%", summary.pct_within_25)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ErrorSummary {
        ErrorSummary { median_error: 12.345, mean_error: 18.0, pct_within_10: 41.5, pct_within_25: 72.0 }
    }

    #[test]
    fn card_values_format() {
        let values = card_values(&summary());
        assert_eq!(values[0], ("Median % Error", "12.3%".to_string()));
        assert_eq!(values[1], ("Mean % Error", "18.0%".to_string()));
        assert_eq!(values[2], ("Within 10%", "41.5%".to_string()));
        assert_eq!(values[3], ("Within 25%", "72%".to_string()));
    }

    #[test]
    fn postgame_adds_a_second_strip() {
        let mut metrics = WeeklyMetrics { pregame: summary(), postgame: None };
        assert_eq!(MetricsPanel::height(&metrics), CARD_HEIGHT + 1);
        metrics.postgame = Some(summary());
        assert_eq!(MetricsPanel::height(&metrics), 2 * (CARD_HEIGHT + 1));
    }

    #[test]
    fn renders_postgame_title_only_when_present() {
        let metrics = WeeklyMetrics { pregame: summary(), postgame: None };
        let area = Rect::new(0, 0, 80, MetricsPanel::height(&metrics) * 2);
        let mut buf = Buffer::empty(area);
        MetricsPanel { metrics: &metrics }.render(area, &mut buf);

        let text: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Pregame Model"));
        assert!(!text.contains("Postgame Model"));
        assert!(text.contains("12.3%"));
    }
}
