/// Fallback used whenever the duration text cannot be parsed (30 minutes)
pub const DEFAULT_DURATION_SECS: i64 = 1800;

/// Longest text the duration field accepts ("MM:SS")
pub const MAX_DURATION_INPUT_LEN: usize = 5;

/// Parse "M:S" / "MM:SS" into a second count.
///
/// Anything that isn't exactly two integer parts separated by a single colon
/// yields [`DEFAULT_DURATION_SECS`]. Values are not clamped, so "-1:00" is -60.
pub fn parse_duration_to_seconds(text: &str) -> i64 {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 2 {
        return DEFAULT_DURATION_SECS;
    }

    match (parts[0].parse::<i64>(), parts[1].parse::<i64>()) {
        (Ok(minutes), Ok(seconds)) => minutes.saturating_mul(60).saturating_add(seconds),
        _ => DEFAULT_DURATION_SECS,
    }
}

/// Render a second count as zero padded "MM:SS"
pub fn format_seconds(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Keep only digits and ':'; returns None when the cleaned text is too long
/// so the caller can keep its previous value.
pub fn sanitize_duration_input(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();

    if cleaned.chars().count() > MAX_DURATION_INPUT_LEN {
        None
    } else {
        Some(cleaned)
    }
}

/// Editable duration text as typed on the setup screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationField {
    text: String,
}

impl DurationField {
    pub fn new(initial: &str) -> Self {
        let mut field = Self {
            text: String::new(),
        };
        field.set(initial);
        field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Seconds the current text parses to, with the usual fallback
    pub fn seconds(&self) -> i64 {
        parse_duration_to_seconds(&self.text)
    }

    /// Replace the whole text. Returns false (leaving the old text) when rejected.
    pub fn set(&mut self, raw: &str) -> bool {
        match sanitize_duration_input(raw) {
            Some(cleaned) => {
                self.text = cleaned;
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, c: char) -> bool {
        let mut candidate = self.text.clone();
        candidate.push(c);
        match sanitize_duration_input(&candidate) {
            Some(cleaned) if cleaned != self.text => {
                self.text = cleaned;
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl Default for DurationField {
    fn default() -> Self {
        Self::new("30:00")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        assert_eq!(parse_duration_to_seconds("05:30"), 330);
        assert_eq!(parse_duration_to_seconds("10:00"), 600);
        assert_eq!(parse_duration_to_seconds("1:2"), 62);
        assert_eq!(parse_duration_to_seconds("0:0"), 0);
    }

    #[test]
    fn test_parse_malformed_falls_back() {
        assert_eq!(parse_duration_to_seconds(""), DEFAULT_DURATION_SECS);
        assert_eq!(parse_duration_to_seconds("abc"), 1800);
        assert_eq!(parse_duration_to_seconds("1:2:3"), 1800);
        assert_eq!(parse_duration_to_seconds("1::2"), 1800);
        assert_eq!(parse_duration_to_seconds("12345"), 1800);
        assert_eq!(parse_duration_to_seconds(":30"), 1800);
        assert_eq!(parse_duration_to_seconds("5:"), 1800);
    }

    #[test]
    fn test_parse_is_not_clamped() {
        assert_eq!(parse_duration_to_seconds("-1:00"), -60);
        assert_eq!(parse_duration_to_seconds("0:90"), 90);
        assert_eq!(parse_duration_to_seconds("99:99"), 6039);
    }

    #[test]
    fn test_parse_overflow_saturates() {
        let huge = format!("{}:0", i64::MAX);
        assert_eq!(parse_duration_to_seconds(&huge), i64::MAX);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(330), "05:30");
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(3599), "59:59");
        assert_eq!(format_seconds(6000), "100:00");
    }

    #[test]
    fn test_format_then_parse_is_identity_below_100_minutes() {
        for t in 0..6000u64 {
            assert_eq!(parse_duration_to_seconds(&format_seconds(t)), t as i64);
        }
    }

    #[test]
    fn test_sanitize_strips_and_limits() {
        assert_eq!(sanitize_duration_input("1a2:b3"), Some("12:3".to_string()));
        assert_eq!(sanitize_duration_input("  05:30 "), Some("05:30".to_string()));
        assert_eq!(sanitize_duration_input("123:45"), None);
        assert_eq!(sanitize_duration_input(""), Some(String::new()));
        // shape is not validated here
        assert_eq!(sanitize_duration_input("1::2"), Some("1::2".to_string()));
    }

    #[test]
    fn test_field_editing() {
        let mut field = DurationField::new("");
        for c in "10:00".chars() {
            assert!(field.push(c));
        }
        assert_eq!(field.text(), "10:00");
        assert_eq!(field.seconds(), 600);

        // sixth character is rejected
        assert!(!field.push('0'));
        assert_eq!(field.text(), "10:00");

        // letters are dropped
        field.backspace();
        assert!(!field.push('x'));
        assert_eq!(field.text(), "10:0");

        field.clear();
        assert_eq!(field.seconds(), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_field_set_rejects_long_input() {
        let mut field = DurationField::default();
        assert_eq!(field.text(), "30:00");
        assert!(!field.set("100:00"));
        assert_eq!(field.text(), "30:00");
        assert!(field.set("5:30"));
        assert_eq!(field.seconds(), 330);
    }
}
