use chrono::{DateTime, NaiveDateTime};

/// Render a backend timestamp for display. The service emits either RFC 3339
/// or a bare local datetime without offset; anything unparseable passes
/// through unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%b %d, %Y %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%b %d, %Y %H:%M").to_string();
        }
    }
    raw.to_string()
}

/// Duration label for a history entry, e.g. `12 min`.
pub fn format_duration(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{} min", minutes)
    }
}

/// Shorten text to at most `max` characters, ending in `…` when cut.
/// Char-based so multi-byte previews never split.
pub fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_none() {
        return head;
    }
    let mut cut: String = head.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        // Backend LocalDateTime, no offset
        assert_eq!(format_timestamp("2024-10-25T10:00:00"), "Oct 25, 2024 10:00");
        // Fractional seconds
        assert_eq!(
            format_timestamp("2024-10-25T10:00:00.123"),
            "Oct 25, 2024 10:00"
        );
        // RFC 3339
        assert_eq!(
            format_timestamp("2024-10-24T15:30:00Z"),
            "Oct 24, 2024 15:30"
        );
        // Unparseable input passes through
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(12), "12 min");
        assert_eq!(format_duration(59), "59 min");
        assert_eq!(format_duration(60), "1h 00m");
        assert_eq!(format_duration(95), "1h 35m");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("exactly ten", 11), "exactly ten");
        assert_eq!(preview("a longer sentence", 8), "a longe…");
        // Multi-byte text truncates on char boundaries
        assert_eq!(preview("tränen über tränen", 7), "tränen…");
    }
}
