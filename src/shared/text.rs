/// Truncate a string to at most `max` characters (Unicode scalar values).
///
/// Used for the diagnostic snippets embedded in error responses so that a
/// huge upstream body never leaks into a client-facing message.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_input_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_chars_cuts_at_limit() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        // Each of these is 3 bytes in UTF-8
        assert_eq!(truncate_chars("食べて飲んで", 3), "食べて");
    }
}
