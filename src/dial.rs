use chrono::{DateTime, TimeZone, Timelike};

/// Hours shown around the dial
pub const HOURS_ON_DIAL: u32 = 24;
pub const DEGREES_PER_HOUR: f64 = 360.0 / HOURS_ON_DIAL as f64;
/// 60 minutes span one 15° hour, so every 4 minutes is one degree
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// Position of `time` on a 24-hour dial, in degrees clockwise from the "0" mark.
///
/// Seconds are ignored, so the value moves in quarter-degree steps.
pub fn hour_angle<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    f64::from(time.hour()) * DEGREES_PER_HOUR + f64::from(time.minute()) / MINUTES_PER_DEGREE
}

pub fn fraction_of_circle(degrees: f64) -> f64 {
    degrees / 360.0
}

/// Canvas coordinates for an angle on the dial: 0° points up, angles grow clockwise.
pub fn point_on_dial(degrees: f64, radius: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (radius * radians.sin(), radius * radians.cos())
}

/// Sample points along the dial outline trimmed to `from..to`, both given as
/// fractions of a full turn. `to` past 1.0 wraps around the top of the dial;
/// anything beyond one full turn is dropped.
pub fn arc_points(from: f64, to: f64, radius: f64, step_degrees: f64) -> Vec<(f64, f64)> {
    let sweep = ((to - from) * 360.0).min(360.0);
    if sweep <= 0.0 || step_degrees <= 0.0 {
        return Vec::new();
    }

    let start = from * 360.0;
    // Fractions rarely land exactly on a step; ignore float noise at the end
    let steps = (sweep / step_degrees - 1e-9).ceil().max(1.0) as usize;

    (0..=steps)
        .map(|i| {
            let offset = (i as f64 * step_degrees).min(sweep);
            point_on_dial((start + offset) % 360.0, radius)
        })
        .collect()
}

/// Major ticks (0, 6, 12, 18) get a longer mark and a bold label
pub fn is_major_hour(hour: u32) -> bool {
    hour % 6 == 0
}
