use chrono::{NaiveTime, Timelike};

// ---------------------------------------------------------------------------
// HH:MM <-> minutes
// ---------------------------------------------------------------------------

/// Parse `HH:MM` into minutes since midnight.
///
/// Malformed or empty input degrades to 0 rather than failing: the checkers
/// must never panic on data that reached them. Callers on the save path
/// enforce format and ordering first via `Event::check_placement`.
pub fn to_minutes(hhmm: &str) -> u32 {
    NaiveTime::parse_from_str(hhmm.trim(), "%H:%M")
        .map(|t| t.hour() * 60 + t.minute())
        .unwrap_or(0)
}

/// Render minutes since midnight as `HH:MM`, clamped to 23:59.
pub fn minutes_to_hhmm(mins: u32) -> String {
    let m = mins.min(23 * 60 + 59);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Strict `HH:MM` shape check: two digits, colon, two digits, real minute
/// value. Used by the save-path pre-checks, not by the checkers.
pub fn is_valid_hhmm(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return false;
    }
    if !b[0].is_ascii_digit()
        || !b[1].is_ascii_digit()
        || !b[3].is_ascii_digit()
        || !b[4].is_ascii_digit()
    {
        return false;
    }
    NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}

// ---------------------------------------------------------------------------
// Interval tests
// ---------------------------------------------------------------------------

/// Half-open interval overlap: `max(starts) < min(ends)`. Touching endpoints
/// do not overlap, so back-to-back lessons are legal.
pub fn overlaps_min(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}

/// Inclusive containment: `outer` fully contains `inner`. An interval
/// encloses itself.
pub fn encloses_min(inner_start: u32, inner_end: u32, outer_start: u32, outer_end: u32) -> bool {
    outer_start <= inner_start && inner_end <= outer_end
}

/// `overlaps_min` over `HH:MM` strings.
pub fn ranges_overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> bool {
    overlaps_min(
        to_minutes(a_start),
        to_minutes(a_end),
        to_minutes(b_start),
        to_minutes(b_end),
    )
}

/// `encloses_min` over `HH:MM` strings.
pub fn encloses(inner_start: &str, inner_end: &str, outer_start: &str, outer_end: &str) -> bool {
    encloses_min(
        to_minutes(inner_start),
        to_minutes(inner_end),
        to_minutes(outer_start),
        to_minutes(outer_end),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hhmm() {
        assert_eq!(to_minutes("08:00"), 480);
        assert_eq!(to_minutes("13:45"), 825);
        assert_eq!(to_minutes("00:00"), 0);
    }

    #[test]
    fn malformed_times_fall_back_to_zero() {
        assert_eq!(to_minutes(""), 0);
        assert_eq!(to_minutes("noon"), 0);
        assert_eq!(to_minutes("25:99"), 0);
    }

    #[test]
    fn renders_and_clamps() {
        assert_eq!(minutes_to_hhmm(480), "08:00");
        assert_eq!(minutes_to_hhmm(825), "13:45");
        assert_eq!(minutes_to_hhmm(99_999), "23:59");
    }

    #[test]
    fn hhmm_shape_is_strict() {
        assert!(is_valid_hhmm("09:30"));
        assert!(is_valid_hhmm("23:59"));
        assert!(!is_valid_hhmm("9:30"));
        assert!(!is_valid_hhmm("09:60"));
        assert!(!is_valid_hhmm("24:00"));
        assert!(!is_valid_hhmm("0930"));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps_min(480, 540, 540, 600));
        assert!(overlaps_min(480, 541, 540, 600));
    }

    #[test]
    fn overlap_is_symmetric() {
        assert_eq!(
            overlaps_min(480, 600, 540, 660),
            overlaps_min(540, 660, 480, 600)
        );
    }

    #[test]
    fn interval_encloses_itself() {
        assert!(encloses_min(480, 600, 480, 600));
        assert!(encloses("09:00", "10:00", "09:00", "10:00"));
        assert!(!encloses("09:00", "10:30", "09:00", "10:00"));
    }
}
