use crate::logic::format_display_date;
use crate::models::{ForecastDay, TapReport};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

pub struct ForecastScreen<'a> {
    pub report: Option<&'a TapReport>,
    pub selected_index: usize,
}

impl<'a> ForecastScreen<'a> {
    pub fn new(report: Option<&'a TapReport>) -> Self {
        Self {
            report,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    fn in_window(&self, day: &ForecastDay) -> bool {
        self.report
            .and_then(|r| r.best_window.as_ref())
            .map(|w| w.contains(day.date))
            .unwrap_or(false)
    }
}

impl Widget for ForecastScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(8),    // Table
                Constraint::Length(3), // Selected day detail
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Daily Forecast", Theme::title()),
            Span::styled(" - highlighted rows are the best tapping window", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_table(chunks[1], buf);
        self.render_detail(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[1-3]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl ForecastScreen<'_> {
    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let days = match self.report {
            Some(r) if !r.days.is_empty() => &r.days,
            _ => {
                Paragraph::new(Span::styled("No forecast loaded", Theme::dim()))
                    .block(block)
                    .render(area, buf);
                return;
            }
        };

        let header = Row::new(
            ["Day", "Low", "High", "Rating", "Score", "Summary"]
                .iter()
                .map(|h| Cell::from(*h).style(Theme::header())),
        )
        .height(1);

        let rows: Vec<Row> = days
            .iter()
            .map(|day| {
                let rating_style = Style::default().fg(day.rating.color());
                let row_style = if self.in_window(day) {
                    Theme::in_window()
                } else {
                    Theme::normal()
                };

                Row::new(vec![
                    Cell::from(format_display_date(day.date)),
                    temp_cell(day.low_c),
                    temp_cell(day.high_c),
                    Cell::from(format!("{} {}", day.rating.symbol(), day.rating))
                        .style(rating_style),
                    Cell::from(day.score.to_string()),
                    Cell::from(day.summary.as_str()),
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Min(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Theme::selected());

        let mut state = TableState::default();
        state.select(Some(self.selected_index.min(days.len() - 1)));
        StatefulWidget::render(table, area, buf, &mut state);
    }

    fn render_detail(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let day = match self.report.and_then(|r| r.days.get(self.selected_index)) {
            Some(d) => d,
            None => {
                block.render(area, buf);
                return;
            }
        };

        let window_note = if self.in_window(day) {
            Span::styled(" in best window", Theme::success())
        } else if day.is_favorable() {
            Span::styled(" favorable", Theme::success())
        } else {
            Span::raw("")
        };

        let line = Line::from(vec![
            Span::styled(format_display_date(day.date), Theme::highlight()),
            Span::raw("  "),
            Span::styled(day.summary.as_str(), Theme::normal()),
            window_note,
        ]);
        Paragraph::new(line).block(block).render(area, buf);
    }
}

fn temp_cell(temp: Option<f64>) -> Cell<'static> {
    match temp {
        Some(t) => {
            Cell::from(format!("{:.1}°C", t)).style(Style::default().fg(Theme::temp_color(t)))
        }
        None => Cell::from("-").style(Theme::dim()),
    }
}
