/// Compact duration label for an item: "2h", "2.5h", "2h 15m", "45m".
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let (hours, rest) = (minutes / 60, minutes % 60);

    if hours == 0 {
        return format!("{}m", rest);
    }

    match rest {
        0 => format!("{}h", hours),
        30 => format!("{}.5h", hours),
        _ => format!("{}h {}m", hours, rest),
    }
}
