use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn color_for(&self, value: f64) -> Color {
        self.thresholds
            .iter()
            .rev()
            .find(|(threshold, _)| value >= *threshold)
            .map(|(_, color)| *color)
            .unwrap_or(Theme::FG)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let value = match self.value {
            Some(v) => v,
            None => {
                Paragraph::new(Span::styled("N/A", Theme::dim())).render(inner, buf);
                return;
            }
        };

        let color = self.color_for(value);
        let text = format!("{:.prec$}{}", value, self.unit, prec = self.precision);
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .render(inner, buf);

        if inner.height < 2 {
            return;
        }

        let bar_y = inner.y + 1;
        let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        let filled = (inner.width as f64 * ratio) as u16;
        for x in inner.x..inner.x + inner.width {
            let ch = if x < inner.x + filled { '█' } else { '░' };
            buf[(x, bar_y)].set_char(ch).set_fg(color);
        }
    }
}

/// Celsius gauge spanning a late-winter range
pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°C")
        .range(-20.0, 20.0)
        .thresholds(vec![
            (f64::NEG_INFINITY, Theme::TEMP_HARD_FREEZE),
            (-7.0, Theme::TEMP_FREEZE),
            (0.0, Theme::TEMP_THAW),
            (10.0, Theme::TEMP_WARM),
            (20.0, Theme::TEMP_HOT),
        ])
}

/// Share of forecast days rated good or better
pub fn favorable_gauge(title: &str, favorable: usize, total: usize) -> GaugeWidget<'_> {
    let value = if total == 0 {
        None
    } else {
        Some(favorable as f64 / total as f64 * 100.0)
    };
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .thresholds(vec![
            (0.0, Theme::DIM),
            (1.0, Theme::WARNING),
            (40.0, Theme::SUCCESS),
        ])
}
