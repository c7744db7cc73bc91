//! Input length accounting and the submit predicate.
//!
//! Length is counted in chars. The counter shown to the user is clamped to
//! [`MAX_INPUT_CHARS`] and its colour follows [`Severity`], but length never
//! affects whether a message may be sent.

/// Capacity of the input buffer.
pub const MAX_INPUT_CHARS: usize = 1000;
/// Counter turns to a warning above this many chars.
pub const WARN_THRESHOLD: usize = 800;
/// Counter turns critical above this many chars.
pub const CRITICAL_THRESHOLD: usize = 900;

/// Visual severity of the character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn for_len(len: usize) -> Self {
        if len > CRITICAL_THRESHOLD {
            Severity::Critical
        } else if len > WARN_THRESHOLD {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Char count clamped for display.
pub fn display_len(text: &str) -> usize {
    char_len(text).min(MAX_INPUT_CHARS)
}

/// Counter text, e.g. `"42/1000"`.
pub fn counter_label(text: &str) -> String {
    format!("{}/{}", display_len(text), MAX_INPUT_CHARS)
}

/// A message may be sent iff it has non-whitespace content and nothing is in flight.
pub fn can_submit(text: &str, in_flight: bool) -> bool {
    !in_flight && !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_submit_requires_content() {
        assert!(can_submit("hello", false));
        assert!(!can_submit("", false));
        assert!(!can_submit("  \n\t ", false));
    }

    #[test]
    fn test_can_submit_blocked_while_in_flight() {
        assert!(!can_submit("hello", true));
    }

    #[test]
    fn test_severity_thresholds_are_strict() {
        assert_eq!(Severity::for_len(0), Severity::Normal);
        assert_eq!(Severity::for_len(800), Severity::Normal);
        assert_eq!(Severity::for_len(801), Severity::Warning);
        assert_eq!(Severity::for_len(900), Severity::Warning);
        assert_eq!(Severity::for_len(901), Severity::Critical);
        assert_eq!(Severity::for_len(1000), Severity::Critical);
    }

    #[test]
    fn test_exactly_max_is_accepted() {
        let text = "a".repeat(MAX_INPUT_CHARS);
        assert!(can_submit(&text, false));
        assert_eq!(counter_label(&text), "1000/1000");
    }

    #[test]
    fn test_display_len_clamps_but_validity_does_not() {
        let text = "b".repeat(MAX_INPUT_CHARS + 25);
        assert_eq!(display_len(&text), MAX_INPUT_CHARS);
        assert!(can_submit(&text, false));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(counter_label("日本"), "2/1000");
    }
}
