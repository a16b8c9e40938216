//! Display formatting for race times and rankings.

/// Format decimal minutes as `MM:SS`, or `H:MM:SS` from one hour up.
///
/// Seconds are rounded half-to-even and a rounded-up 60 carries into the
/// minutes field, so `1.999999` renders as `02:00`. Negative and non-finite
/// inputs render as `00:00`.
pub fn format_duration(minutes: f64) -> String {
    let minutes = if minutes.is_finite() { minutes.max(0.0) } else { 0.0 };

    let whole = minutes.trunc();
    let seconds = ((minutes - whole) * 60.0).round_ties_even();
    let total_seconds = whole as u64 * 60 + seconds as u64;

    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Append an English ordinal suffix chosen by the last digit alone.
///
/// The teens follow the same rule, so 11 renders as `11st`, 12 as `12nd`
/// and 13 as `13rd`.
pub fn format_ordinal(value: u32) -> String {
    let suffix = match value % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{}", value, suffix)
}
