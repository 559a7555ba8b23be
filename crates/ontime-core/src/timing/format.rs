//! Rendering of day-relative millisecond times for display surfaces.

use super::reconcile::DAY_MS;

/// Render a day-relative time as `HH:MM:SS`.
///
/// Negative values clamp to `00:00:00`; values past 24 h wrap.
pub fn millis_to_string(ms: i64) -> String {
    let ms = ms.max(0) % DAY_MS;
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1_000) % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Render a delay offset in compact signed form (`+1m30s`, `-10s`).
///
/// Returns an empty string for offsets under one second; a zero delay has
/// nothing to display.
pub fn delay_to_string(ms: i64) -> String {
    if ms.abs() < 1_000 {
        return String::new();
    }
    let sign = if ms < 0 { '-' } else { '+' };
    format!("{sign}{}", compact_duration(ms.abs()))
}

/// Label for a signed overlap magnitude, or `None` when back-to-back.
///
/// Negative means the event starts before the previous one ends.
pub fn overlap_label(overlap_ms: i64) -> Option<String> {
    if overlap_ms == 0 {
        None
    } else if overlap_ms < 0 {
        Some(format!("Overlapping {}", compact_duration(-overlap_ms)))
    } else {
        Some(format!("Spacing {}", compact_duration(overlap_ms)))
    }
}

/// Parse a user-entered time value: `HH:MM`, `HH:MM:SS`, or bare
/// milliseconds.
pub fn parse_time_entry(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(ms) = text.parse::<i64>() {
        return Some(ms);
    }
    let parts: Vec<&str> = text.split(':').collect();
    match parts.as_slice() {
        [h, m] => {
            let h = h.parse::<i64>().ok()?;
            let m = m.parse::<i64>().ok()?;
            Some(h * 3_600_000 + m * 60_000)
        }
        [h, m, s] => {
            let h = h.parse::<i64>().ok()?;
            let m = m.parse::<i64>().ok()?;
            let s = s.parse::<i64>().ok()?;
            Some(h * 3_600_000 + m * 60_000 + s * 1_000)
        }
        _ => None,
    }
}

fn compact_duration(ms: i64) -> String {
    if ms < 1_000 {
        return format!("{ms}ms");
    }
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1_000) % 60;
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 {
        out.push_str(&format!("{seconds}s"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_hours_minutes_seconds() {
        assert_eq!(millis_to_string(0), "00:00:00");
        assert_eq!(millis_to_string(10 * 3_600_000 + 5 * 60_000 + 3_000), "10:05:03");
    }

    #[test]
    fn negative_clamps_and_day_wraps() {
        assert_eq!(millis_to_string(-500), "00:00:00");
        assert_eq!(millis_to_string(DAY_MS + 3_600_000), "01:00:00");
    }

    #[test]
    fn delay_strings_are_signed_and_compact() {
        assert_eq!(delay_to_string(0), "");
        assert_eq!(delay_to_string(500), "");
        assert_eq!(delay_to_string(90_000), "+1m30s");
        assert_eq!(delay_to_string(-10_000), "-10s");
        assert_eq!(delay_to_string(3_600_000), "+1h");
    }

    #[test]
    fn overlap_labels() {
        assert_eq!(overlap_label(0), None);
        assert_eq!(overlap_label(-20_000).as_deref(), Some("Overlapping 20s"));
        assert_eq!(overlap_label(50_000).as_deref(), Some("Spacing 50s"));
        assert_eq!(overlap_label(-500).as_deref(), Some("Overlapping 500ms"));
    }

    #[test]
    fn parses_clock_and_millisecond_entries() {
        assert_eq!(parse_time_entry("10:00"), Some(10 * 3_600_000));
        assert_eq!(parse_time_entry("10:00:30"), Some(10 * 3_600_000 + 30_000));
        assert_eq!(parse_time_entry("90000"), Some(90_000));
        assert_eq!(parse_time_entry("abc"), None);
        assert_eq!(parse_time_entry("1:2:3:4"), None);
    }
}
