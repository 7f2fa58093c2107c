//! Clock-format conversion and validation
//!
//! Editor input and the generation contract use 24-hour `HH:MM`; persisted
//! calendar items display 12-hour `H:MM AM/PM` ranges. Conversions here are
//! pure; validation reports through plain message strings that the entity
//! validators prefix with a field path.

use std::sync::LazyLock;

use regex::Regex;

static RE_24H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").expect("valid regex"));

static RE_12H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(1[0-2]|0?[1-9]):([0-5][0-9]) (AM|PM)$").expect("valid regex"));

/// Parse a 24-hour `HH:MM` (or unpadded `H:MM`) string into (hour, minute)
pub fn parse_24h(time: &str) -> Option<(u32, u32)> {
    let caps = RE_24H.captures(time)?;
    let hours = caps[1].parse().ok()?;
    let minutes = caps[2].parse().ok()?;
    Some((hours, minutes))
}

/// Whether a string is a well-formed 24-hour time
pub fn is_valid_24h(time: &str) -> bool {
    parse_24h(time).is_some()
}

/// Parse a 12-hour `H:MM AM/PM` string into minutes since midnight
pub fn parse_12h(time: &str) -> Option<u32> {
    let caps = RE_12H.captures(time)?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    let pm = &caps[3] == "PM";
    let hours24 = match (hours, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    Some(hours24 * 60 + minutes)
}

/// Render a 24-hour time in the 12-hour display format
///
/// `"00:30"` becomes `"12:30 AM"`, `"12:00"` stays `"12:00 PM"`, afternoon
/// hours drop 12. Malformed input passes through unchanged; callers validate
/// before formatting.
pub fn format_time_24_to_12(time: &str) -> String {
    let Some((hours, minutes)) = parse_24h(time) else {
        return time.to_string();
    };
    let period = if hours >= 12 { "PM" } else { "AM" };
    let hours12 = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", hours12, minutes, period)
}

/// Inverse of [`format_time_24_to_12`], producing zero-padded `HH:MM`
///
/// Round-trip law: `convert_to_24_hour(format_time_24_to_12(t)) == t` for
/// every valid zero-padded `HH:MM`. Malformed input passes through unchanged.
pub fn convert_to_24_hour(time: &str) -> String {
    let Some(total) = parse_12h(time) else {
        return time.to_string();
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Check a stored `"H:MM AM/PM - H:MM AM/PM"` display range
///
/// The range must parse on both sides and start strictly before end.
pub fn check_range_12h(range: &str) -> Result<(), String> {
    let Some((start, end)) = range.split_once(" - ") else {
        return Err("expected \"H:MM AM/PM - H:MM AM/PM\"".to_string());
    };
    let Some(start) = parse_12h(start) else {
        return Err(format!("invalid start time in range \"{}\"", range));
    };
    let Some(end) = parse_12h(end) else {
        return Err(format!("invalid end time in range \"{}\"", range));
    };
    if start >= end {
        return Err("start time must be before end time".to_string());
    }
    Ok(())
}
