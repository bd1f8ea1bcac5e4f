//! Environment variable validation with helpful error messages
//!
//! Invalid values fall back to a default with a warning and, when the input
//! is a near miss, a "did you mean" suggestion.

use std::io::Write;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, returning default if invalid (with warning on stderr)
    pub fn parse<T, F>(&self, value: &str, parser: F, default: T) -> T
    where
        F: Fn(&str) -> Option<T>,
    {
        self.parse_with_writer(value, parser, default, &mut std::io::stderr())
    }

    /// Parse with a custom writer (for testing)
    pub fn parse_with_writer<T, F, W>(
        &self,
        value: &str,
        parser: F,
        default: T,
        writer: &mut W,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        match parser(value) {
            Some(parsed) => parsed,
            None => {
                let suggestion = suggest(&value.to_lowercase(), self.valid_values)
                    .map(|s| format!(". Did you mean '{}'?", s))
                    .unwrap_or_default();
                let _ = writeln!(
                    writer,
                    "Warning: Invalid {} value '{}'{}",
                    self.var_name, value, suggestion
                );
                let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
                default
            }
        }
    }
}

/// Closest candidate within two edits (exact matches are not suggestions)
pub fn suggest<'c>(input: &str, candidates: &[&'c str]) -> Option<&'c str> {
    let mut best: Option<(&str, usize)> = None;
    for &candidate in candidates {
        let dist = levenshtein(input, candidate);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((candidate, dist)),
        }
    }

    match best {
        Some((candidate, dist)) if dist > 0 && dist <= 2 => Some(candidate),
        _ => None,
    }
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.is_empty() {
        return b_bytes.len();
    }
    if b_bytes.is_empty() {
        return a_bytes.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_bytes.len() + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_bytes.len()]
}

/// Parse a boolean flag the way operators usually spell it
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOL_VALUES: &[&str] = &["true", "false"];

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("host", "host"), 0);
        assert_eq!(levenshtein("hsot", "host"), 2);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn suggest_picks_close_candidate() {
        assert_eq!(suggest("ture", BOOL_VALUES), Some("true"));
        assert_eq!(suggest("maybe", BOOL_VALUES), None);
        assert_eq!(suggest("true", BOOL_VALUES), None);
    }

    #[test]
    fn invalid_value_warns_and_falls_back() {
        let validator = EnvVarValidator::new("VPSCTL_VERIFY_HOST_KEY", BOOL_VALUES);
        let mut out = Vec::new();
        let value = validator.parse_with_writer("flase", parse_bool, true, &mut out);
        assert!(value);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Invalid VPSCTL_VERIFY_HOST_KEY value 'flase'"));
        assert!(text.contains("Did you mean 'false'?"));
    }

    #[test]
    fn valid_value_is_silent() {
        let validator = EnvVarValidator::new("VPSCTL_VERIFY_HOST_KEY", BOOL_VALUES);
        let mut out = Vec::new();
        assert!(!validator.parse_with_writer("off", parse_bool, true, &mut out));
        assert!(out.is_empty());
    }
}
