use chrono::TimeZone;
use fastdial::{
    controller::FastSnapshot,
    dial::{arc_points, is_major_hour, point_on_dial, DEGREES_PER_HOUR, HOURS_ON_DIAL},
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Widget,
    },
};
use unicode_width::UnicodeWidthStr;

const DIAL_RADIUS: f64 = 1.0;
const LABEL_RADIUS: f64 = 1.16;
const HAND_LENGTH: f64 = 0.6;
/// Canvas units from the centre to the nearest edge
const VIEW_SPAN: f64 = 1.3;
const ARC_RADII: [f64; 3] = [0.93, 0.96, 0.99];
const ARC_STEP_DEGREES: f64 = 0.5;

/// Canvas bounds that keep the dial round. Terminal cells are roughly twice
/// as tall as they are wide.
pub fn dial_bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let ratio = f64::from(area.width) / (2.0 * f64::from(area.height.max(1)));
    let (x_span, y_span) = if ratio >= 1.0 {
        (VIEW_SPAN * ratio, VIEW_SPAN)
    } else {
        (VIEW_SPAN, VIEW_SPAN / ratio.max(0.01))
    };
    ([-x_span, x_span], [-y_span, y_span])
}

/// Points of the progress arc, thickened over a few radii
pub fn progress_arc<Tz: TimeZone>(snapshot: &FastSnapshot<Tz>) -> Vec<(f64, f64)> {
    if !snapshot.has_progress() {
        return Vec::new();
    }
    let (from, to) = snapshot.arc_trim();
    ARC_RADII
        .iter()
        .flat_map(|radius| arc_points(from, to, *radius, ARC_STEP_DEGREES))
        .collect()
}

pub fn render<Tz: TimeZone>(snapshot: &FastSnapshot<Tz>, area: Rect, buf: &mut Buffer) {
    if area.width < 8 || area.height < 4 {
        return;
    }

    let (x_bounds, y_bounds) = dial_bounds(area);
    let units_per_cell = (x_bounds[1] - x_bounds[0]) / f64::from(area.width);
    let show_minor_labels = area.width >= 48 && area.height >= 16;

    let arc = progress_arc(snapshot);
    let arc_color = if snapshot.is_complete() {
        Color::Green
    } else {
        Color::Blue
    };
    let hand = point_on_dial(snapshot.clock.hour_angle, HAND_LENGTH);

    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: DIAL_RADIUS,
                color: Color::DarkGray,
            });

            for hour in 0..HOURS_ON_DIAL {
                let angle = f64::from(hour) * DEGREES_PER_HOUR;
                let inner = if is_major_hour(hour) { 0.8 } else { 0.9 };
                let (x1, y1) = point_on_dial(angle, inner * DIAL_RADIUS);
                let (x2, y2) = point_on_dial(angle, DIAL_RADIUS);
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, Color::Gray));
            }

            if !arc.is_empty() {
                ctx.draw(&Points {
                    coords: &arc,
                    color: arc_color,
                });
            }

            ctx.draw(&CanvasLine::new(0.0, 0.0, hand.0, hand.1, Color::White));

            ctx.layer();

            for hour in 0..HOURS_ON_DIAL {
                let major = is_major_hour(hour);
                if !major && !show_minor_labels {
                    continue;
                }
                let label = hour.to_string();
                let (x, y) = point_on_dial(f64::from(hour) * DEGREES_PER_HOUR, LABEL_RADIUS);
                // print() anchors at the left edge; shift by half the label
                let x = x - (label.width() as f64 * units_per_cell) / 2.0;
                let style = if major {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                ctx.print(x, y, Span::styled(label, style));
            }
        })
        .render(area, buf);
}
