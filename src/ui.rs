pub mod dial_canvas;
pub mod picker;

use std::fmt::Display;

use chrono::TimeZone;
use fastdial::{
    clock::Clock,
    util::{format_hms, format_percent},
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw<C: Clock>(app: &App<C>, f: &mut Frame)
where
    <C::Tz as TimeZone>::Offset: Display,
{
    f.render_widget(app, f.area());
}

impl<C: Clock> Widget for &App<C>
where
    <C::Tz as TimeZone>::Offset: Display,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_italic_style = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(6),    // Dial
                Constraint::Length(2), // Status
                Constraint::Length(3), // Buttons
                Constraint::Length(1), // Key help
            ])
            .split(area);

        Paragraph::new(Span::styled("Simple Fasting", bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        dial_canvas::render(&self.snapshot, chunks[1], buf);

        Paragraph::new(status_lines(self))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        render_buttons(self, chunks[3], buf);

        Paragraph::new(Span::styled(
            "(space) start/end  (i) interval  (q) quit",
            dim_italic_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        if self.state == AppState::Picker {
            picker::render(self.picker.cursor, self.fasting.selected(), area, buf);
        }
    }
}

fn status_lines<C: Clock>(app: &App<C>) -> Vec<Line<'static>>
where
    <C::Tz as TimeZone>::Offset: Display,
{
    let snapshot = &app.snapshot;
    let now = snapshot.clock.at.format("%H:%M").to_string();
    let end = snapshot
        .end_time
        .as_ref()
        .map(|end| end.format("%a %H:%M").to_string())
        .unwrap_or_default();

    let mut lines = if snapshot.is_active {
        vec![
            Line::from(format!(
                "Fasting {}h, ends {} ({})",
                snapshot.duration_hours,
                end,
                format_percent(snapshot.elapsed_fraction)
            )),
            Line::from(format!("{} remaining", format_hms(snapshot.remaining_secs))),
        ]
    } else if snapshot.is_complete() {
        vec![
            Line::from(Span::styled(
                format!("Fast complete: {}h done at {}", snapshot.duration_hours, end),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Now {now}, interval {}", app.fasting.selected())),
        ]
    } else {
        vec![
            Line::from(format!("Now {now}")),
            Line::from(format!(
                "Interval {} selected, press space to start",
                app.fasting.selected()
            )),
        ]
    };

    if let Some(err) = &app.last_error {
        lines.truncate(1);
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

fn render_buttons<C: Clock>(app: &App<C>, area: Rect, buf: &mut Buffer) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let button = |label: &'static str, color: Color| {
        Paragraph::new(Span::styled(
            label,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().bg(color))
    };

    button("Change Fasting Interval", Color::Green).render(halves[0], buf);

    let (label, color) = if app.snapshot.is_active {
        ("End Fasting", Color::Red)
    } else {
        ("Start Fasting", Color::Blue)
    };
    button(label, color).render(halves[1], buf);
}
