//! Lenient date/time parsing — ordered pattern tables
//!
//! Each table is a static, ordered list of (grammar, reducer) pairs. Parsing
//! iterates the table in authored order and the *first* matching rule wins;
//! this is priority dispatch, not longest-match. When no rule matches, the
//! trimmed input is returned verbatim — an unrecognized spelling is not an
//! error, downstream schema validation owns rejection.
//!
//! Reducers are pure and never panic on syntactically matching input. Numeric
//! overflow (month 13, hour 99) flows through into the canonical text as an
//! invalid lexical value; this layer does not range-check.
//!
//! The year-less `mm/dd` rule is the only clock-dependent rule; the current
//! year is injected through [`Clock`] so tests can pin it.

use std::sync::OnceLock;

use chrono::Datelike;
use regex::{Captures, Regex};

// ── Clock seam ────────────────────────────────────────────

/// Source of the current calendar year, used only by the year-less date rule.
pub trait Clock {
    fn current_year(&self) -> i32;
}

/// Wall-clock implementation backed by the local system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

/// Deterministic clock pinned to a fixed year.
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

// ── Pattern rules ─────────────────────────────────────────

/// One recognizable textual shape plus the reduction of its capture groups
/// to a canonical sub-value.
pub struct PatternRule {
    /// Regular grammar with capture groups. Anchoring is part of the authored
    /// rule: an unanchored pattern deliberately matches a substring.
    pub pattern: &'static str,
    /// Pure reduction from captured groups to canonical text. Only ever
    /// invoked with groups satisfying `pattern`.
    pub reduce: fn(&Captures<'_>, current_year: i32) -> String,
}

/// Date rules in priority order, each producing `YYYY-MM-DD`.
pub static DATE_RULES: [PatternRule; 4] = [
    // mm/dd/yyyy (American style)
    PatternRule {
        pattern: r"^(\d{1,2})/(\d{1,2})/(\d{2,4})$",
        reduce: |caps, _year| {
            format!(
                "{:04}-{:02}-{:02}",
                group_num(caps, 3),
                group_num(caps, 1),
                group_num(caps, 2)
            )
        },
    },
    // mm/dd (American style without year) — year defaults to the current year
    PatternRule {
        pattern: r"^(\d{1,2})/(\d{1,2})$",
        reduce: |caps, year| {
            format!("{:04}-{:02}-{:02}", year, group_num(caps, 1), group_num(caps, 2))
        },
    },
    // dd.mm.yyyy (Swiss style)
    PatternRule {
        pattern: r"^(\d{1,2})\.(\d{1,2})\.(\d{2,4})$",
        reduce: |caps, _year| {
            format!(
                "{:04}-{:02}-{:02}",
                group_num(caps, 3),
                group_num(caps, 2),
                group_num(caps, 1)
            )
        },
    },
    // yyyy-mm-dd (ISO style) — unanchored, may match inside a larger string
    PatternRule {
        pattern: r"(\d{2,4})-(\d{1,2})-(\d{1,2})",
        reduce: |caps, _year| {
            format!(
                "{:04}-{:02}-{:02}",
                group_num(caps, 1),
                group_num(caps, 2),
                group_num(caps, 3)
            )
        },
    },
];

/// Time rules in priority order, each producing 24-hour `HH:MM:SS`.
///
/// The PM suffix rules only adjust hours strictly below 12; an hour that is
/// already >= 12 keeps its value even with a `p` suffix.
pub static TIME_RULES: [PatternRule; 5] = [
    // hh:mm:ss p.m.
    PatternRule {
        pattern: r"(\d{1,2}):(\d{1,2}):(\d{1,2})(?:p| p)",
        reduce: |caps, _year| {
            format!(
                "{:02}:{:02}:{:02}",
                pm_hours(group_num(caps, 1)),
                group_num(caps, 2),
                group_num(caps, 3)
            )
        },
    },
    // hh:mm p.m., no seconds
    PatternRule {
        pattern: r"(\d{1,2}):(\d{1,2})(?:p| p)",
        reduce: |caps, _year| {
            format!(
                "{:02}:{:02}:00",
                pm_hours(group_num(caps, 1)),
                group_num(caps, 2)
            )
        },
    },
    // hh p.m., hour only
    PatternRule {
        pattern: r"(\d{1,2})(?:p| p)",
        reduce: |caps, _year| format!("{:02}:00:00", pm_hours(group_num(caps, 1))),
    },
    // hh:mm:ss
    PatternRule {
        pattern: r"(\d{1,2}):(\d{1,2}):(\d{1,2})",
        reduce: |caps, _year| {
            format!(
                "{:02}:{:02}:{:02}",
                group_num(caps, 1),
                group_num(caps, 2),
                group_num(caps, 3)
            )
        },
    },
    // hh:mm
    PatternRule {
        pattern: r"(\d{1,2}):(\d{1,2})",
        reduce: |caps, _year| {
            format!("{:02}:{:02}:00", group_num(caps, 1), group_num(caps, 2))
        },
    },
];

// ── Parsing ───────────────────────────────────────────────

/// Parse a date spelling into canonical `YYYY-MM-DD` text.
///
/// `current_year` fills in the year for the year-less `mm/dd` rule.
/// Unrecognized input is returned trimmed but otherwise unchanged.
pub fn parse_date(input: &str, current_year: i32) -> String {
    parse(&DATE_RULES, date_regexes(), input, current_year)
}

/// Parse a time spelling into canonical 24-hour `HH:MM:SS` text.
///
/// Unrecognized input is returned trimmed but otherwise unchanged.
pub fn parse_time(input: &str) -> String {
    // Time rules never consult the clock
    parse(&TIME_RULES, time_regexes(), input, 0)
}

fn parse(rules: &[PatternRule], regexes: &[Regex], input: &str, current_year: i32) -> String {
    let trimmed = input.trim();

    for (rule, re) in rules.iter().zip(regexes) {
        if let Some(caps) = re.captures(trimmed) {
            let reduced = (rule.reduce)(&caps, current_year);
            tracing::debug!(pattern = rule.pattern, input = trimmed, output = %reduced, "parse rule fired");
            return reduced;
        }
    }

    // No rule fired — pass through unmodified
    trimmed.to_string()
}

fn date_regexes() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| compile(&DATE_RULES))
}

fn time_regexes() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| compile(&TIME_RULES))
}

fn compile(rules: &[PatternRule]) -> Vec<Regex> {
    rules
        .iter()
        .map(|rule| {
            Regex::new(rule.pattern)
                .unwrap_or_else(|e| panic!("invalid static pattern {:?}: {}", rule.pattern, e))
        })
        .collect()
}

// ── Reducer helpers ───────────────────────────────────────

/// Numeric value of a capture group. Groups are all short digit runs, so the
/// parse cannot fail for a matching input.
fn group_num(caps: &Captures<'_>, index: usize) -> u32 {
    caps[index].parse().unwrap_or_default()
}

/// PM adjustment: only hours strictly below 12 are shifted.
fn pm_hours(hours: u32) -> u32 {
    if hours < 12 {
        hours + 12
    } else {
        hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2020;

    // ── Date rules ─────────────────────────────────────

    #[test]
    fn test_date_american_style() {
        assert_eq!(parse_date("01/02/2020", YEAR), "2020-01-02");
        assert_eq!(parse_date("1/2/2020", YEAR), "2020-01-02");
        assert_eq!(parse_date("12/31/1999", YEAR), "1999-12-31");
    }

    #[test]
    fn test_date_american_short_year() {
        // 2-4 digit years are taken literally, zero-padded to four digits
        assert_eq!(parse_date("01/02/99", YEAR), "0099-01-02");
        assert_eq!(parse_date("01/02/200", YEAR), "0200-01-02");
    }

    #[test]
    fn test_date_yearless_uses_injected_year() {
        let clock = FixedClock(2031);
        assert_eq!(parse_date("03/04", clock.current_year()), "2031-03-04");
    }

    #[test]
    fn test_date_swiss_style() {
        // Day first
        assert_eq!(parse_date("31.12.2020", YEAR), "2020-12-31");
        assert_eq!(parse_date("1.2.2020", YEAR), "2020-02-01");
    }

    #[test]
    fn test_date_iso_style() {
        assert_eq!(parse_date("2020-05-01", YEAR), "2020-05-01");
        assert_eq!(parse_date("2020-5-1", YEAR), "2020-05-01");
    }

    #[test]
    fn test_date_iso_rule_is_unanchored() {
        // The ISO rule deliberately matches a substring of a larger string.
        // Kept as authored; a future anchoring must be a deliberate change.
        assert_eq!(parse_date("born 2020-05-01 maybe", YEAR), "2020-05-01");
    }

    #[test]
    fn test_date_priority_american_beats_iso() {
        // "01/02/2020" satisfies the American rule; the unanchored ISO rule
        // must never get a chance to see it.
        assert_eq!(parse_date("01/02/2020", YEAR), "2020-01-02");
    }

    #[test]
    fn test_date_idempotence_on_canonical_values() {
        for canonical in ["2020-01-02", "1999-12-31", "0099-01-02"] {
            assert_eq!(parse_date(canonical, YEAR), canonical);
        }
    }

    #[test]
    fn test_date_no_match_passes_through_trimmed() {
        assert_eq!(parse_date("  tomorrow  ", YEAR), "tomorrow");
        assert_eq!(parse_date("", YEAR), "");
    }

    #[test]
    fn test_date_overflow_propagates_as_invalid_value() {
        // Month 13 is not range-checked here; schema validation rejects it later
        assert_eq!(parse_date("13/32/2020", YEAR), "2020-13-32");
    }

    // ── Time rules ─────────────────────────────────────

    #[test]
    fn test_time_pm_full() {
        assert_eq!(parse_time("9:30:00p"), "21:30:00");
        assert_eq!(parse_time("9:30:00 p"), "21:30:00");
    }

    #[test]
    fn test_time_pm_hour_already_past_noon_not_adjusted() {
        // Literal rule: only hours < 12 are shifted
        assert_eq!(parse_time("13:30:00p"), "13:30:00");
        assert_eq!(parse_time("12:00:00p"), "12:00:00");
    }

    #[test]
    fn test_time_pm_no_seconds() {
        assert_eq!(parse_time("9:30p"), "21:30:00");
    }

    #[test]
    fn test_time_pm_hour_only() {
        assert_eq!(parse_time("9p"), "21:00:00");
        assert_eq!(parse_time("9 p"), "21:00:00");
    }

    #[test]
    fn test_time_24h() {
        assert_eq!(parse_time("09:30:15"), "09:30:15");
        assert_eq!(parse_time("9:5:3"), "09:05:03");
    }

    #[test]
    fn test_time_24h_seconds_default_zero() {
        assert_eq!(parse_time("09:30"), "09:30:00");
        assert_eq!(parse_time("9:30"), "09:30:00");
    }

    #[test]
    fn test_time_no_match_passes_through_trimmed() {
        assert_eq!(parse_time(" now "), "now");
        assert_eq!(parse_time(""), "");
    }

    #[test]
    fn test_time_overflow_propagates_as_invalid_value() {
        assert_eq!(parse_time("99:99:99"), "99:99:99");
        // 99 >= 12, so the PM rule leaves it alone too
        assert_eq!(parse_time("99:99:99p"), "99:99:99");
    }

    // ── Determinism ────────────────────────────────────

    #[test]
    fn test_parse_determinism_100_iterations() {
        let first = parse_date("01/02/2020", YEAR);
        for i in 0..100 {
            assert_eq!(parse_date("01/02/2020", YEAR), first, "iteration {}", i);
        }
    }

    #[test]
    fn test_system_clock_year_is_plausible() {
        assert!(SystemClock.current_year() >= 2024);
    }
}
