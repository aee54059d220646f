use crate::logic::{
    doy_to_date, format_display_date, get_season_info, season_doys, SEASON_REFERENCE_POINTS,
};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

/// Reference table plus the interpolated timing for the configured latitude
pub struct SeasonScreen {
    pub latitude: f64,
    pub year: i32,
}

impl SeasonScreen {
    pub fn new(latitude: f64, year: i32) -> Self {
        Self { latitude, year }
    }
}

impl Widget for SeasonScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(9), // Reference table
                Constraint::Min(5),    // Advisory
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Season Timing", Theme::title()),
            Span::styled(format!(" - {}", self.year), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_table(chunks[1], buf);
        self.render_advisory(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[←→]", Theme::nav_key()),
            Span::styled("Year ", Theme::nav_label()),
            Span::styled("[1-3]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl SeasonScreen {
    fn date_cell(&self, doy: u32) -> Cell<'static> {
        match doy_to_date(doy, self.year) {
            Some(d) => Cell::from(format_display_date(d)),
            None => Cell::from("-").style(Theme::dim()),
        }
    }

    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(
            ["Latitude", "Tap By", "Season Ends"]
                .iter()
                .map(|h| Cell::from(*h).style(Theme::header())),
        );

        let mut rows: Vec<Row> = SEASON_REFERENCE_POINTS
            .iter()
            .map(|p| {
                Row::new(vec![
                    Cell::from(format!("{:.0}°", p.latitude)),
                    self.date_cell(p.tap_by_doy),
                    self.date_cell(p.season_end_doy),
                ])
                .style(Theme::normal())
            })
            .collect();

        let (tap_by, season_end) = season_doys(self.latitude);
        rows.push(
            Row::new(vec![
                Cell::from(format!("{:.2}° (you)", self.latitude)),
                self.date_cell(tap_by),
                self.date_cell(season_end),
            ])
            .style(Theme::highlight()),
        );

        let widths = [
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(14),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .render(area, buf);
    }

    fn render_advisory(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Advisory", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let text = match get_season_info(self.latitude, self.year) {
            Ok(info) => Span::styled(info.message, Theme::normal()),
            Err(e) => Span::styled(e.to_string(), Theme::warning()),
        };

        Paragraph::new(Line::from(text))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
