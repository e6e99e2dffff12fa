/// ISO-8601 compact duration parsing (the `PT#H#M#S` form used by the
/// YouTube Data API's contentDetails.duration field)
use regex::Regex;
use std::sync::OnceLock;

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid duration regex")
    })
}

/// Parse a compact `PT[nH][nM][nS]` duration into total whole seconds.
///
/// Any absent component contributes 0. Input that does not match the
/// pattern at all also yields 0; this function never fails. Absurdly
/// large components saturate instead of overflowing.
pub fn parse_iso8601_seconds(encoded: &str) -> u64 {
    let Some(caps) = duration_pattern().captures(encoded.trim()) else {
        return 0;
    };

    let component = |idx: usize| -> u64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_duration() {
        assert_eq!(parse_iso8601_seconds("PT1H30M15S"), 5415);
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(parse_iso8601_seconds("PT1M30S"), 90);
    }

    #[test]
    fn test_hours_only() {
        assert_eq!(parse_iso8601_seconds("PT2H"), 7200);
    }

    #[test]
    fn test_seconds_only() {
        assert_eq!(parse_iso8601_seconds("PT45S"), 45);
    }

    #[test]
    fn test_empty_components() {
        assert_eq!(parse_iso8601_seconds("PT"), 0);
    }

    #[test]
    fn test_malformed_input_is_zero() {
        assert_eq!(parse_iso8601_seconds(""), 0);
        assert_eq!(parse_iso8601_seconds("1h30m"), 0);
        assert_eq!(parse_iso8601_seconds("P1DT2H"), 0);
        assert_eq!(parse_iso8601_seconds("garbage"), 0);
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(parse_iso8601_seconds(" PT3M "), 180);
    }

    #[test]
    fn test_huge_hours_saturate_instead_of_overflowing() {
        // 1e16 hours exceeds u64 seconds
        assert_eq!(parse_iso8601_seconds("PT10000000000000000H"), u64::MAX);
        assert_eq!(
            parse_iso8601_seconds("PT18446744073709551615H59M59S"),
            u64::MAX
        );
    }

    #[test]
    fn test_component_beyond_u64_counts_as_zero() {
        // 2^64 itself fails to parse as u64, so the hour term drops out
        assert_eq!(parse_iso8601_seconds("PT18446744073709551616H30S"), 30);
    }
}
