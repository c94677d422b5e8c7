/// `HH:MM:SS` for a count of seconds; hours may exceed 24
pub fn format_hms(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Whole percent, floored so a running fast never shows 100%
pub fn format_percent(fraction: f64) -> String {
    let clamped = fraction.clamp(0.0, 1.0);
    format!("{}%", (clamped * 100.0).floor() as u32)
}
