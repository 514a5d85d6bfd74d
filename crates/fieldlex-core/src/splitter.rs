//! dateTime splitting and joining
//!
//! A combined dateTime external value arrives as one string with a single
//! separator character between the date and time parts. The split separator
//! is caller-supplied (the default pipeline uses the UI hierarchy separator);
//! recombination always uses the canonical `'T'` regardless of how the value
//! was split.

/// Canonical separator joining normalized date and time sub-values.
pub const JOIN_SEPARATOR: char = 'T';

/// Everything before the first `separator`, trimmed.
/// The whole value (trimmed) if the separator is absent.
pub fn date_part(value: &str, separator: char) -> &str {
    match value.find(separator) {
        Some(index) => value[..index].trim(),
        None => value.trim(),
    }
}

/// Everything after the first `separator`, trimmed.
/// Empty if the separator is absent.
pub fn time_part(value: &str, separator: char) -> &str {
    match value.find(separator) {
        Some(index) => value[index + separator.len_utf8()..].trim(),
        None => "",
    }
}

/// Join canonical date and time parts with [`JOIN_SEPARATOR`].
///
/// Two empty parts yield the empty string, never a bare `"T"`.
pub fn join(date: &str, time: &str) -> String {
    if date.is_empty() && time.is_empty() {
        String::new()
    } else {
        format!("{}{}{}", date, JOIN_SEPARATOR, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_space() {
        assert_eq!(date_part("2020-05-01 09:30", ' '), "2020-05-01");
        assert_eq!(time_part("2020-05-01 09:30", ' '), "09:30");
    }

    #[test]
    fn test_split_trims_parts() {
        assert_eq!(date_part("  2020-05-01  \u{b7} 09:30 ", '\u{b7}'), "2020-05-01");
        assert_eq!(time_part("  2020-05-01  \u{b7} 09:30 ", '\u{b7}'), "09:30");
    }

    #[test]
    fn test_separator_absent() {
        // Date part takes the whole value, time part is empty
        assert_eq!(date_part("2020-05-01", 'T'), "2020-05-01");
        assert_eq!(time_part("2020-05-01", 'T'), "");
    }

    #[test]
    fn test_split_on_first_occurrence_only() {
        assert_eq!(date_part("a b c", ' '), "a");
        assert_eq!(time_part("a b c", ' '), "b c");
    }

    #[test]
    fn test_join_uses_canonical_separator() {
        assert_eq!(join("2020-05-01", "09:30:00"), "2020-05-01T09:30:00");
    }

    #[test]
    fn test_join_both_empty_is_empty() {
        assert_eq!(join("", ""), "");
    }

    #[test]
    fn test_join_one_sided() {
        // Only the fully-empty case is special
        assert_eq!(join("2020-05-01", ""), "2020-05-01T");
        assert_eq!(join("", "09:30:00"), "T09:30:00");
    }

    #[test]
    fn test_multibyte_separator() {
        let value = "2020-05-01\u{b7}09:30";
        assert_eq!(date_part(value, '\u{b7}'), "2020-05-01");
        assert_eq!(time_part(value, '\u{b7}'), "09:30");
    }
}
