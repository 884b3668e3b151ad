//! Duration formatting for badges and gateway responses

/// Format a duration for display: `"45s"`, `"5m"`, `"1h 5m"`.
pub fn format_short_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{hours}h")
        }
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{seconds}s")
    }
}

/// Badge text for an in-progress session. Empty under one minute so the
/// badge stays blank until there is something worth showing.
pub fn badge_text(elapsed_seconds: u64) -> String {
    let minutes = elapsed_seconds / 60;
    if minutes > 0 {
        format!("{minutes}m")
    } else {
        String::new()
    }
}
