use crate::logic::format_display_date;
use crate::models::TapReport;
use crate::ui::components::{favorable_gauge, temperature_gauge};
use crate::ui::Theme;
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct DashboardScreen<'a> {
    pub location_name: &'a str,
    pub report: Option<&'a TapReport>,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(location_name: &'a str, report: Option<&'a TapReport>) -> Self {
        Self {
            location_name,
            report,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges row
                Constraint::Min(8),    // Recommendation, window, season
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);

        self.render_recommendation(middle[0], buf);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(4)])
            .split(middle[1]);

        self.render_window(right[0], buf);
        self.render_season(right[1], buf);

        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!("sapcast - {}", self.location_name),
                Theme::title(),
            ))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = match self.report {
            Some(r) => format!(
                "{:.2}, {:.2} | Updated {}",
                r.latitude,
                r.longitude,
                r.generated_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
            ),
            None => "No forecast loaded".to_string(),
        };

        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let report = self.report;
        let today = report.and_then(|r| r.today.as_ref());
        let week_low = report.and_then(|r| {
            r.days
                .iter()
                .filter_map(|d| d.low_c)
                .min_by(|a, b| a.total_cmp(b))
        });

        let now = report.and_then(|r| r.current.as_ref()).map(|c| c.temp_c);
        temperature_gauge("Now", now).render(gauge_chunks[0], buf);
        temperature_gauge("Today Low", today.and_then(|d| d.low_c)).render(gauge_chunks[1], buf);
        temperature_gauge("Today High", today.and_then(|d| d.high_c))
            .render(gauge_chunks[2], buf);
        temperature_gauge("Week Low", week_low).render(gauge_chunks[3], buf);

        let (favorable, total) = report
            .map(|r| (r.favorable_days(), r.days.len()))
            .unwrap_or((0, 0));
        favorable_gauge("Good Days", favorable, total).render(gauge_chunks[4], buf);
    }

    fn render_recommendation(&self, area: Rect, buf: &mut Buffer) {
        let recommendation = match self.report {
            Some(r) => &r.recommendation,
            None => {
                let block = Block::default()
                    .title(Span::styled("Recommendation", Theme::header()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border());
                Paragraph::new(Span::styled("Press [r] to fetch the forecast", Theme::dim()))
                    .block(block)
                    .render(area, buf);
                return;
            }
        };

        let kind = recommendation.kind;
        let kind_style = Style::default().fg(kind.color());
        let border_style = if kind.is_actionable() {
            kind_style
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(Span::styled("Recommendation", Theme::header()))
            .borders(Borders::ALL)
            .border_style(border_style);

        let text = vec![
            Line::from(vec![
                Span::styled(format!("{} ", kind.symbol()), kind_style),
                Span::styled(kind.title(), kind_style),
            ]),
            Line::from(""),
            Line::from(Span::styled(recommendation.message.as_str(), Theme::normal())),
        ];

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_window(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Best Window", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines = match self.report.and_then(|r| r.best_window.as_ref()) {
            Some(w) => vec![
                Line::from(Span::styled(
                    format!(
                        "{} to {}",
                        format_display_date(w.start_date),
                        format_display_date(w.end_date)
                    ),
                    Theme::highlight(),
                )),
                Line::from(Span::styled(
                    format!("{} days, avg score {:.1}", w.days, w.avg_score),
                    Theme::dim(),
                )),
            ],
            None => vec![Line::from(Span::styled("No tapping window", Theme::dim()))],
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }

    fn render_season(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Season", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let text = match self.report {
            Some(r) => Span::styled(r.season.message.as_str(), Theme::normal()),
            None => Span::styled("-", Theme::dim()),
        };

        Paragraph::new(Line::from(text))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("failed") || msg.contains("not configured") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Forecast ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Season ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}
