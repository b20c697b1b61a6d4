//! Pure presentation helpers: collection-name validation, byte-size
//! formatting, and relative-time formatting. No state, no IO.

use chrono::{DateTime, Utc};

/// Allowed-character policy for collection names: letters of any script,
/// digits, underscore, hyphen. Empty names are rejected.
pub fn is_valid_collection_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Format a byte count for display, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}

/// Format a timestamp relative to `now`, e.g. `3 hours ago`.
///
/// Falls back to the plain date beyond a week, and to `just now` for
/// timestamps in the future (clock skew between client and backend).
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);

    if elapsed.num_seconds() < 60 {
        return "just now".to_string();
    }
    if elapsed.num_minutes() < 60 {
        return plural(elapsed.num_minutes(), "minute");
    }
    if elapsed.num_hours() < 24 {
        return plural(elapsed.num_hours(), "hour");
    }
    if elapsed.num_days() < 7 {
        return plural(elapsed.num_days(), "day");
    }

    timestamp.format("%Y-%m-%d").to_string()
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_valid_collection_names() {
        assert!(is_valid_collection_name("project_documents"));
        assert!(is_valid_collection_name("docs-2024"));
        assert!(is_valid_collection_name("문서모음"));
        assert!(is_valid_collection_name("Ärzte_Berichte"));
    }

    #[test]
    fn test_invalid_collection_names() {
        assert!(!is_valid_collection_name(""));
        assert!(!is_valid_collection_name("has space"));
        assert!(!is_valid_collection_name("dot.name"));
        assert!(!is_valid_collection_name("slash/name"));
        assert!(!is_valid_collection_name("emoji🙂"));
    }

    proptest! {
        #[test]
        fn prop_allowed_alphabet_always_valid(name in r"[\p{L}\p{Nd}_\-]{1,32}") {
            prop_assert!(is_valid_collection_name(&name));
        }

        #[test]
        fn prop_forbidden_char_always_invalid(
            prefix in r"[a-z]{0,8}",
            bad in r"[ .!@#$%^&*()+=/\\]",
            suffix in r"[a-z]{0,8}",
        ) {
            let name = format!("{}{}{}", prefix, bad, suffix);
            prop_assert!(!is_valid_collection_name(&name));
        }
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let t = now - chrono::Duration::seconds(30);
        assert_eq!(relative_time(t, now), "just now");

        let t = now - chrono::Duration::minutes(1);
        assert_eq!(relative_time(t, now), "1 minute ago");

        let t = now - chrono::Duration::hours(3);
        assert_eq!(relative_time(t, now), "3 hours ago");

        let t = now - chrono::Duration::days(2);
        assert_eq!(relative_time(t, now), "2 days ago");

        let t = now - chrono::Duration::days(30);
        assert_eq!(relative_time(t, now), "2024-05-16");
    }

    #[test]
    fn test_relative_time_future_is_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let t = now + chrono::Duration::hours(1);
        assert_eq!(relative_time(t, now), "just now");
    }
}
